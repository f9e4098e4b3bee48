use serde::{Deserialize, Serialize};

/// Combines a test method name and a case name into a display name.
///
/// Returns `None` when no method name is known yet. The format is
/// `method(case name)`; hosts report on it, so it must stay stable.
pub fn display_name(method_name: Option<&str>, case_name: &str) -> Option<String> {
    match method_name {
        Some(method) if !method.is_empty() => Some(format!("{}({})", method, case_name)),
        _ => None,
    }
}

/// Naming state of a row.
///
/// A row starts `Unnamed` and becomes `Named` the first time a method name
/// is supplied. It never goes back.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum Naming {
    #[default]
    Unnamed,
    Named {
        method_name: String,
        display_name: String,
    },
}

impl Naming {
    /// Binds `method_name` to the state.
    ///
    /// The display name is always rebuilt from `case_name`, never from a
    /// previous display name. Without a method name the state is kept.
    pub fn bind(&self, method_name: Option<&str>, case_name: &str) -> Naming {
        match (method_name, display_name(method_name, case_name)) {
            (Some(method), Some(display)) => Naming::Named {
                method_name: method.to_string(),
                display_name: display,
            },
            _ => self.clone(),
        }
    }

    pub fn method_name(&self) -> Option<&str> {
        match self {
            Naming::Unnamed => None,
            Naming::Named { method_name, .. } => Some(method_name),
        }
    }

    pub fn display_name(&self) -> Option<&str> {
        match self {
            Naming::Unnamed => None,
            Naming::Named { display_name, .. } => Some(display_name),
        }
    }

    pub fn is_named(&self) -> bool {
        matches!(self, Naming::Named { .. })
    }
}
