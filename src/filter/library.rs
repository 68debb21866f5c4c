//! Named filters supplied from outside the crate.
//!
//! Filter design algorithms (Butterworth, Chebyshev, elliptic, ...) are not
//! implemented here. A host registers ready-made designs by name in a
//! [`FilterLibrary`], or provides its own [`CoefficientProvider`], and the
//! session consumes coefficients through that interface only.

use crate::filter::Coefficients;
use hashbrown::HashMap;
use std::fmt;

/// Name reserved for "no library filter, derive from the plane".
pub const NONE: &str = "None";

/// Source of coefficients for named filters.
pub trait CoefficientProvider {
    /// Coefficients for `name`, or `None` if the name is unknown.
    fn coefficients_for(&self, name: &str) -> Option<Coefficients>;

    /// Known filter names, sorted.
    fn names(&self) -> Vec<String>;
}

/// Which coefficients drive the live signal.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum FilterSelection {
    /// Derive coefficients from the current zeros and poles.
    None,
    /// Use the named library filter.
    Named(String),
}

impl FilterSelection {
    /// Maps the reserved `"None"` name (and the empty string) to
    /// [`FilterSelection::None`].
    pub fn from_name(name: &str) -> Self {
        if name.is_empty() || name == NONE {
            FilterSelection::None
        } else {
            FilterSelection::Named(name.to_string())
        }
    }

    pub fn name(&self) -> &str {
        match self {
            FilterSelection::None => NONE,
            FilterSelection::Named(name) => name.as_str(),
        }
    }
}

impl Default for FilterSelection {
    fn default() -> Self {
        FilterSelection::None
    }
}

impl fmt::Display for FilterSelection {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.name())
    }
}

type Design = Box<dyn Fn() -> Coefficients + Send>;

/// Registry of named designs.
#[derive(Default)]
pub struct FilterLibrary {
    designs: HashMap<String, Design>,
}

impl FilterLibrary {
    pub fn new() -> Self {
        FilterLibrary::default()
    }

    /// Registers `design` under `name`, replacing any previous entry. The
    /// reserved name is ignored.
    pub fn register<F>(&mut self, name: &str, design: F)
    where
        F: Fn() -> Coefficients + Send + 'static,
    {
        if name == NONE {
            return;
        }
        self.designs.insert(name.to_string(), Box::new(design));
    }

    /// Registers fixed coefficients under `name`.
    pub fn register_coefficients(&mut self, name: &str, coeffs: Coefficients) {
        self.register(name, move || coeffs.clone());
    }

    pub fn len(&self) -> usize {
        self.designs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.designs.is_empty()
    }
}

impl CoefficientProvider for FilterLibrary {
    fn coefficients_for(&self, name: &str) -> Option<Coefficients> {
        if name == NONE {
            return Some(Coefficients::identity());
        }
        self.designs.get(name).map(|design| design())
    }

    fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.designs.keys().cloned().collect();
        names.sort();
        names
    }
}

#[cfg(test)]
mod test {
    use crate::filter::library::*;

    #[test]
    fn test_registry_lookup() {
        let mut library = FilterLibrary::new();
        library.register_coefficients(
            "Moving Average",
            Coefficients::new(vec![0.5, 0.5], vec![1.0]),
        );
        library.register("Leaky", || Coefficients::new(vec![0.1], vec![1.0, -0.9]));

        assert_eq!(library.len(), 2);
        assert_eq!(library.names(), vec!["Leaky".to_string(), "Moving Average".to_string()]);
        assert_eq!(
            library.coefficients_for("Leaky"),
            Some(Coefficients::new(vec![0.1], vec![1.0, -0.9]))
        );
        assert_eq!(library.coefficients_for("Elliptic HPF"), None);
    }

    #[test]
    fn test_none_is_reserved() {
        let mut library = FilterLibrary::new();
        library.register_coefficients(NONE, Coefficients::new(vec![2.0], vec![1.0]));
        assert!(library.is_empty());
        assert_eq!(library.coefficients_for(NONE), Some(Coefficients::identity()));
    }

    #[test]
    fn test_selection_names() {
        assert_eq!(FilterSelection::from_name("None"), FilterSelection::None);
        assert_eq!(FilterSelection::from_name(""), FilterSelection::None);
        let sel = FilterSelection::from_name("Butterworth LPF");
        assert_eq!(sel, FilterSelection::Named("Butterworth LPF".to_string()));
        assert_eq!(sel.to_string(), "Butterworth LPF");
        assert_eq!(FilterSelection::default().name(), "None");
    }
}
