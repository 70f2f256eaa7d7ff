use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Counselor {
    pub id: String,
    pub name: String,
    pub specialties: Vec<String>,
    pub languages: Vec<String>,
    pub experience: String,
    pub rating: f32,
    pub bio: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct CounselorCatalog {
    pub counselors: Vec<Counselor>,
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

impl Default for CounselorCatalog {
    fn default() -> Self {
        Self {
            counselors: vec![
                Counselor {
                    id: "1".to_string(),
                    name: "Dr. Priya Sharma".to_string(),
                    specialties: strings(&["Anxiety", "Depression", "Stress Management"]),
                    languages: strings(&["English", "Hindi", "Tamil"]),
                    experience: "8 years".to_string(),
                    rating: 4.9,
                    bio: "Specializes in cognitive behavioral therapy and mindfulness-based interventions.".to_string(),
                },
                Counselor {
                    id: "2".to_string(),
                    name: "Dr. Arjun Patel".to_string(),
                    specialties: strings(&["Relationship Counseling", "Family Therapy", "Communication Skills"]),
                    languages: strings(&["English", "Hindi", "Gujarati"]),
                    experience: "12 years".to_string(),
                    rating: 4.8,
                    bio: "Expert in family dynamics and relationship counseling with a holistic approach.".to_string(),
                },
                Counselor {
                    id: "3".to_string(),
                    name: "Dr. Meera Singh".to_string(),
                    specialties: strings(&["Trauma Recovery", "PTSD", "Grief Counseling"]),
                    languages: strings(&["English", "Hindi", "Punjabi"]),
                    experience: "10 years".to_string(),
                    rating: 4.9,
                    bio: "Trauma-informed specialist helping individuals heal from difficult experiences.".to_string(),
                },
            ],
        }
    }
}

impl CounselorCatalog {
    pub fn find_by_id(&self, id: &str) -> Option<&Counselor> {
        self.counselors.iter().find(|c| c.id == id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.find_by_id(id).is_some()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Counselor> {
        self.counselors.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_catalog_lookup() {
        let catalog = CounselorCatalog::default();
        assert_eq!(catalog.iter().count(), 3);
        assert_eq!(catalog.find_by_id("2").map(|c| c.name.as_str()), Some("Dr. Arjun Patel"));
        assert!(!catalog.contains("4"));
        assert!(!catalog.contains(""));
    }
}
