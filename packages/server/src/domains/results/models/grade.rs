use serde::Serialize;
use std::fmt;

/// Letter grade derived from a percentage score
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Grade {
    #[serde(rename = "A+")]
    APlus,
    A,
    #[serde(rename = "B+")]
    BPlus,
    B,
    C,
    D,
    F,
}

impl Grade {
    /// Inclusive lower bounds, checked from the top
    const BANDS: [(f64, Grade); 6] = [
        (90.0, Grade::APlus),
        (80.0, Grade::A),
        (70.0, Grade::BPlus),
        (60.0, Grade::B),
        (50.0, Grade::C),
        (40.0, Grade::D),
    ];

    pub fn from_percentage(percentage: f64) -> Self {
        Self::BANDS
            .iter()
            .find(|(floor, _)| percentage >= *floor)
            .map(|(_, grade)| *grade)
            .unwrap_or(Grade::F)
    }

    /// `total_marks` is validated positive when the exam is stored
    pub fn from_marks(marks_obtained: f64, total_marks: f64) -> Self {
        Self::from_percentage(marks_obtained / total_marks * 100.0)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Grade::APlus => "A+",
            Grade::A => "A",
            Grade::BPlus => "B+",
            Grade::B => "B",
            Grade::C => "C",
            Grade::D => "D",
            Grade::F => "F",
        }
    }
}

impl fmt::Display for Grade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
