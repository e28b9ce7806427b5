use serde::{Deserialize, Serialize};

/// Industry bucket a vendor belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Industry {
    Sensors,
    Materials,
    Plastics,
    Unknown,
}

impl Industry {
    /// Human readable label, also used on the wire
    pub fn display_name(&self) -> &'static str {
        match self {
            Industry::Sensors => "Sensors",
            Industry::Materials => "Materials",
            Industry::Plastics => "Plastics",
            Industry::Unknown => "Unknown",
        }
    }

    pub fn all() -> Vec<Industry> {
        vec![Industry::Sensors, Industry::Materials, Industry::Plastics]
    }

    /// Parse a backend industry label. Case-insensitive, `None` for anything else.
    pub fn from_label(label: &str) -> Option<Self> {
        match label.trim().to_ascii_lowercase().as_str() {
            "sensors" | "sensor" => Some(Industry::Sensors),
            "materials" | "material" => Some(Industry::Materials),
            "plastics" | "plastic" => Some(Industry::Plastics),
            _ => None,
        }
    }

    /// Derive the industry from a vendor type such as "Sensor Supplier"
    pub fn from_vendor_type(vendor_type: &str) -> Option<Self> {
        let lower = vendor_type.to_ascii_lowercase();
        if lower.contains("sensor") {
            Some(Industry::Sensors)
        } else if lower.contains("plastic") {
            Some(Industry::Plastics)
        } else if lower.contains("material") {
            Some(Industry::Materials)
        } else {
            None
        }
    }

    /// Materials and Plastics share the "materials" type bucket
    pub fn is_materials_like(&self) -> bool {
        matches!(self, Industry::Materials | Industry::Plastics)
    }
}

impl std::fmt::Display for Industry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.display_name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_label() {
        assert_eq!(Industry::from_label("Sensors"), Some(Industry::Sensors));
        assert_eq!(Industry::from_label(" plastics "), Some(Industry::Plastics));
        assert_eq!(Industry::from_label("Other"), None);
    }

    #[test]
    fn test_from_vendor_type() {
        assert_eq!(
            Industry::from_vendor_type("Sensor Supplier"),
            Some(Industry::Sensors)
        );
        assert_eq!(
            Industry::from_vendor_type("Materials Supplier"),
            Some(Industry::Materials)
        );
        assert_eq!(Industry::from_vendor_type("Other Supplier"), None);
    }
}
