use serde::{Deserialize, Serialize};

/// Line shown when a booking is marked urgent.
pub const URGENT_HELPLINE: &str = "+91 11 2233 4455";

/// Line named in the companion's crisis reply.
pub const CRISIS_LINE_NAME: &str = "National Institute of Mental Health and Neuro-Sciences";
pub const CRISIS_LINE_NUMBER: &str = "080-26995000";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HelplineKind {
    Crisis,
    Counseling,
}

#[derive(Debug, Clone, Serialize)]
pub struct Helpline {
    pub name: &'static str,
    pub number: &'static str,
    pub description: &'static str,
    pub availability: &'static str,
    pub languages: &'static [&'static str],
    pub kind: HelplineKind,
}

#[derive(Debug, Clone, Serialize)]
pub struct EmergencyStep {
    pub title: &'static str,
    pub description: &'static str,
    pub action: &'static str,
}

pub const HELPLINES: &[Helpline] = &[
    Helpline {
        name: "National Suicide Prevention Helpline",
        number: "9152987821",
        description: "24/7 crisis support and suicide prevention",
        availability: "24/7",
        languages: &["Hindi", "English"],
        kind: HelplineKind::Crisis,
    },
    Helpline {
        name: "Vandrevala Foundation Helpline",
        number: "9999666555",
        description: "Mental health support and counseling",
        availability: "24/7",
        languages: &["Hindi", "English", "Tamil", "Telugu"],
        kind: HelplineKind::Counseling,
    },
    Helpline {
        name: "AASRA Mumbai",
        number: "9820466726",
        description: "Emotional support and crisis intervention",
        availability: "24/7",
        languages: &["Hindi", "English", "Marathi"],
        kind: HelplineKind::Crisis,
    },
    Helpline {
        name: "Sneha Chennai",
        number: "04424640050",
        description: "Suicide prevention and emotional support",
        availability: "24/7",
        languages: &["Tamil", "English"],
        kind: HelplineKind::Crisis,
    },
    Helpline {
        name: "Sumaitri Delhi",
        number: "01123389090",
        description: "Emotional support for those in distress",
        availability: "24/7",
        languages: &["Hindi", "English"],
        kind: HelplineKind::Counseling,
    },
    Helpline {
        name: "Parivarthan Bangalore",
        number: "07676602602",
        description: "Mental health support and counseling",
        availability: "24/7",
        languages: &["Kannada", "English", "Hindi"],
        kind: HelplineKind::Counseling,
    },
];

pub const EMERGENCY_STEPS: &[EmergencyStep] = &[
    EmergencyStep {
        title: "Immediate Danger",
        description: "If you or someone else is in immediate physical danger",
        action: "Call 100 (Police) or 108 (Emergency Services)",
    },
    EmergencyStep {
        title: "Suicidal Thoughts",
        description: "If you're having thoughts of self-harm or suicide",
        action: "Call a crisis helpline immediately - you're not alone",
    },
    EmergencyStep {
        title: "Mental Health Crisis",
        description: "If you're experiencing severe anxiety, panic, or emotional distress",
        action: "Reach out to a counseling helpline or trusted person",
    },
    EmergencyStep {
        title: "Need Someone to Talk",
        description: "If you need emotional support or someone to listen",
        action: "Contact any of the helplines below - they're here for you",
    },
];

pub fn crisis_helplines() -> impl Iterator<Item = &'static Helpline> {
    HELPLINES.iter().filter(|h| h.kind == HelplineKind::Crisis)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn crisis_lines_are_filtered_by_kind() {
        let names: Vec<_> = crisis_helplines().map(|h| h.name).collect();
        assert_eq!(names, ["National Suicide Prevention Helpline", "AASRA Mumbai", "Sneha Chennai"]);
    }
}
