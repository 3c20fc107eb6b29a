use crate::tracker::TrackerError;
use serde::{Deserialize, Serialize};

/// Macro to generate enum with as_str + std::str::FromStr pattern
macro_rules! str_enum {
    ($name:ident { $($variant:ident => $s:literal),+ $(,)? }) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(rename_all = "snake_case")]
        pub enum $name {
            $($variant),+
        }

        impl $name {
            pub fn as_str(&self) -> &'static str {
                match self {
                    $(Self::$variant => $s),+
                }
            }
        }

        impl std::str::FromStr for $name {
            type Err = TrackerError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $($s => Ok(Self::$variant)),+,
                    _ => Err(TrackerError::InvalidEnum {
                        field: stringify!($name).into(),
                        value: s.into(),
                    }),
                }
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }
    };
}

str_enum!(IntakeStatus {
    Taken => "taken",
    Skipped => "skipped",
});

str_enum!(SlotStatus {
    Pending => "pending",
    Taken => "taken",
    Skipped => "skipped",
});

str_enum!(DoseForm {
    Tablet => "tablet",
    Capsule => "capsule",
    Liquid => "liquid",
    Injection => "injection",
    Other => "other",
});

str_enum!(DosageUnit {
    Mg => "mg",
    Ml => "ml",
    G => "g",
    Mcg => "mcg",
});

str_enum!(View {
    Dashboard => "dashboard",
    Add => "add",
    Reports => "reports",
});

str_enum!(DuplicateLogPolicy {
    Append => "append",
    Reject => "reject",
    Replace => "replace",
});

str_enum!(AdherenceWindow {
    Rolling => "rolling",
    CalendarAligned => "calendar_aligned",
});

str_enum!(RosterWeighting {
    CurrentRoster => "current_roster",
    ActiveOnDay => "active_on_day",
});

impl From<IntakeStatus> for SlotStatus {
    fn from(status: IntakeStatus) -> Self {
        match status {
            IntakeStatus::Taken => SlotStatus::Taken,
            IntakeStatus::Skipped => SlotStatus::Skipped,
        }
    }
}

impl Default for DosageUnit {
    fn default() -> Self {
        Self::Mg
    }
}

impl Default for DoseForm {
    fn default() -> Self {
        Self::Tablet
    }
}

impl Default for View {
    fn default() -> Self {
        Self::Dashboard
    }
}
