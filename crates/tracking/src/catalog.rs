use crate::error::ConfigError;
use crate::event::EventKind;

/// Titles available for one event kind.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Category {
    pub kind: EventKind,
    pub titles: Vec<String>,
}

impl Category {
    pub fn new(kind: EventKind, titles: &[&str]) -> Self {
        Self {
            kind,
            titles: titles.iter().map(|t| t.to_string()).collect(),
        }
    }
}

/// Fixed text pools the generator draws from.
///
/// Descriptions are shared across categories.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Catalog {
    categories: Vec<Category>,
    descriptions: Vec<String>,
}

impl Catalog {
    pub fn new(categories: Vec<Category>, descriptions: Vec<String>) -> Self {
        Self {
            categories,
            descriptions,
        }
    }

    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    pub fn descriptions(&self) -> &[String] {
        &self.descriptions
    }

    pub fn category(&self, kind: EventKind) -> Option<&Category> {
        self.categories.iter().find(|c| c.kind == kind)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.categories.is_empty() {
            return Err(ConfigError::EmptyCatalog);
        }
        if let Some(empty) = self.categories.iter().find(|c| c.titles.is_empty()) {
            return Err(ConfigError::EmptyTitles(empty.kind));
        }
        if self.descriptions.is_empty() {
            return Err(ConfigError::EmptyDescriptions);
        }
        Ok(())
    }
}

impl Default for Catalog {
    fn default() -> Self {
        let categories = vec![
            Category::new(
                EventKind::Pursuit,
                &["High-Speed Pursuit", "Urban Chase", "Suspect Apprehension"],
            ),
            Category::new(
                EventKind::Incident,
                &["Traffic Accident", "Road Disturbance", "Traffic Jam"],
            ),
            Category::new(
                EventKind::Alert,
                &["Zone Alert", "Security Warning", "Anomaly Detection"],
            ),
            Category::new(
                EventKind::Patrol,
                &["Patrol Mission", "Routine Check", "Security Patrol"],
            ),
        ];
        let descriptions = [
            "Target moving at high speed on main arterial road, exceeding speed limit",
            "Suspicious individual detected in designated area",
            "Traffic anomaly detected, units dispatched for investigation",
            "Area surveillance system detected unusual activity",
            "Multiple units deployed to incident location",
            "Real-time tracking of target position and movement trajectory",
        ]
        .iter()
        .map(|d| d.to_string())
        .collect();

        Self::new(categories, descriptions)
    }
}

#[cfg(test)]
mod tests {
    use super::{Catalog, Category};
    use crate::error::ConfigError;
    use crate::event::EventKind;

    #[test]
    fn default_catalog_covers_every_kind() {
        let catalog = Catalog::default();
        assert!(catalog.validate().is_ok());
        assert_eq!(catalog.descriptions().len(), 6);
        for kind in EventKind::ALL {
            let category = catalog.category(kind).unwrap();
            assert_eq!(category.titles.len(), 3, "{kind}");
        }
    }

    #[test]
    fn validate_flags_empty_pools() {
        let empty = Catalog::new(Vec::new(), vec!["d".to_string()]);
        assert_eq!(empty.validate(), Err(ConfigError::EmptyCatalog));

        let no_titles = Catalog::new(
            vec![Category::new(EventKind::Patrol, &[])],
            vec!["d".to_string()],
        );
        assert_eq!(
            no_titles.validate(),
            Err(ConfigError::EmptyTitles(EventKind::Patrol))
        );

        let no_descriptions =
            Catalog::new(vec![Category::new(EventKind::Alert, &["a"])], Vec::new());
        assert_eq!(
            no_descriptions.validate(),
            Err(ConfigError::EmptyDescriptions)
        );
    }
}
