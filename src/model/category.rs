/// A fixed label/color pair used to tag tasks
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Category {
    pub name: &'static str,
    /// Hex display color, `#RRGGBB`
    pub color: &'static str,
}

/// The compiled-in registry. The first entry is the default.
pub const CATEGORIES: [Category; 3] = [
    Category {
        name: "Personal",
        color: "#FFDDC1",
    },
    Category {
        name: "Trabajo",
        color: "#D1FAE5",
    },
    Category {
        name: "Estudio",
        color: "#c1c1c1",
    },
];

impl Default for Category {
    fn default() -> Self {
        CATEGORIES[0]
    }
}

impl Category {
    /// Exact name lookup
    pub fn find(name: &str) -> Option<Category> {
        CATEGORIES.iter().copied().find(|c| c.name == name)
    }

    /// Case-insensitive lookup, for user input
    pub fn find_ignore_case(name: &str) -> Option<Category> {
        CATEGORIES
            .iter()
            .copied()
            .find(|c| c.name.eq_ignore_ascii_case(name))
    }

    /// Position in the registry (0 for unknown names)
    pub fn index_of(name: &str) -> usize {
        CATEGORIES.iter().position(|c| c.name == name).unwrap_or(0)
    }

    pub fn names() -> Vec<&'static str> {
        CATEGORIES.iter().map(|c| c.name).collect()
    }
}
