use std::fmt;

/// Breast laterality (left/right)
///
/// Values produced by textual inference over the acquisition device
/// processing description, used when the explicit DICOM tag is blank.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Laterality {
    Left,
    Right,
}

impl Laterality {
    /// Returns the DICOM code string for this laterality
    pub fn code(&self) -> &'static str {
        match self {
            Laterality::Left => "L",
            Laterality::Right => "R",
        }
    }

    /// Infers laterality from a free-text acquisition description
    ///
    /// Searches for `"R "` before `"L "`; the first match wins.
    /// Returns `None` when neither marker is present.
    pub fn from_description(desc: &str) -> Option<Self> {
        if desc.contains("R ") {
            Some(Laterality::Right)
        } else if desc.contains("L ") {
            Some(Laterality::Left)
        } else {
            None
        }
    }
}

impl fmt::Display for Laterality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// Mammography view position (CC, MLO)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ViewPosition {
    /// Cranio-caudal
    Cc,
    /// Medio-lateral oblique
    Mlo,
}

impl ViewPosition {
    /// Returns the DICOM code string for this view position
    pub fn code(&self) -> &'static str {
        match self {
            ViewPosition::Cc => "CC",
            ViewPosition::Mlo => "MLO",
        }
    }

    /// Infers view position from a free-text acquisition description
    ///
    /// Searches for `"MLO"` before `"CC"`; the first match wins.
    /// Returns `None` when neither marker is present.
    pub fn from_description(desc: &str) -> Option<Self> {
        if desc.contains("MLO") {
            Some(ViewPosition::Mlo)
        } else if desc.contains("CC") {
            Some(ViewPosition::Cc)
        } else {
            None
        }
    }
}

impl fmt::Display for ViewPosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}
