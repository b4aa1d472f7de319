use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

/// Identifier wrapper for volunteer rows fetched by the caller.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct VolunteerId(pub String);

impl VolunteerId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Weekday {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
    Sunday,
}

impl Weekday {
    pub const fn ordered() -> [Self; 7] {
        [
            Self::Monday,
            Self::Tuesday,
            Self::Wednesday,
            Self::Thursday,
            Self::Friday,
            Self::Saturday,
            Self::Sunday,
        ]
    }

    const fn index(self) -> usize {
        match self {
            Self::Monday => 0,
            Self::Tuesday => 1,
            Self::Wednesday => 2,
            Self::Thursday => 3,
            Self::Friday => 4,
            Self::Saturday => 5,
            Self::Sunday => 6,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Daypart {
    Morning,
    Afternoon,
    Evening,
}

impl Daypart {
    pub const fn ordered() -> [Self; 3] {
        [Self::Morning, Self::Afternoon, Self::Evening]
    }

    const fn index(self) -> usize {
        match self {
            Self::Morning => 0,
            Self::Afternoon => 1,
            Self::Evening => 2,
        }
    }
}

/// Weekly availability grid recorded by a volunteer.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AvailabilityMatrix {
    slots: [[bool; 3]; 7],
}

impl AvailabilityMatrix {
    pub fn with_slot(mut self, day: Weekday, part: Daypart) -> Self {
        self.set(day, part, true);
        self
    }

    pub fn set(&mut self, day: Weekday, part: Daypart, available: bool) {
        self.slots[day.index()][part.index()] = available;
    }

    pub fn is_available(&self, day: Weekday, part: Daypart) -> bool {
        self.slots[day.index()][part.index()]
    }

    pub fn open_slots(&self) -> usize {
        self.slots.iter().flatten().filter(|open| **open).count()
    }
}

/// Read-only volunteer record as fetched from storage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VolunteerProfile {
    pub id: VolunteerId,
    #[serde(default)]
    pub display_name: String,
    #[serde(default)]
    pub primary_gifts: Vec<String>,
    #[serde(default)]
    pub secondary_gifts: Vec<String>,
    #[serde(default)]
    pub ministry_passions: Vec<String>,
    #[serde(default)]
    pub skills: Vec<String>,
    #[serde(default)]
    pub past_assignments: u32,
    pub active: bool,
    #[serde(default)]
    pub availability: Option<AvailabilityMatrix>,
}

impl VolunteerProfile {
    /// Every gift, passion and skill tag, normalized for keyword comparison.
    pub fn normalized_tags(&self) -> Vec<String> {
        self.primary_gifts
            .iter()
            .chain(&self.secondary_gifts)
            .chain(&self.ministry_passions)
            .chain(&self.skills)
            .map(|tag| normalize_tag(tag))
            .filter(|tag| !tag.is_empty())
            .collect()
    }
}

/// A profile plus the per-need facts the caller derived from calendar data.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VolunteerCandidate {
    pub profile: VolunteerProfile,
    #[serde(default)]
    pub current_assignments: u32,
    #[serde(default)]
    pub has_conflict: bool,
}

/// The event category or ministry area a scoring pass runs against.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MinistryTarget {
    pub category: String,
}

impl MinistryTarget {
    pub fn new(category: impl Into<String>) -> Self {
        Self {
            category: category.into(),
        }
    }
}

/// One open assignment need: target, optional extra keywords and who already serves it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssignmentNeed {
    pub target: MinistryTarget,
    #[serde(default)]
    pub keywords: Vec<String>,
    #[serde(default)]
    pub assigned: BTreeSet<VolunteerId>,
}

impl AssignmentNeed {
    pub fn for_category(category: impl Into<String>) -> Self {
        Self {
            target: MinistryTarget::new(category),
            keywords: Vec::new(),
            assigned: BTreeSet::new(),
        }
    }

    pub fn with_assigned(mut self, id: impl Into<String>) -> Self {
        self.assigned.insert(VolunteerId::new(id));
        self
    }
}

/// Lowercases, trims and folds common Spanish accents so "Música" matches "musica".
pub fn normalize_tag(raw: &str) -> String {
    raw.trim()
        .to_lowercase()
        .chars()
        .map(|ch| match ch {
            'á' | 'à' | 'ä' => 'a',
            'é' | 'è' | 'ë' => 'e',
            'í' | 'ì' | 'ï' => 'i',
            'ó' | 'ò' | 'ö' => 'o',
            'ú' | 'ù' | 'ü' => 'u',
            other => other,
        })
        .collect()
}
