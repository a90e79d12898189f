//! Fixed role catalogs.
//!
//! Each catalog is a single ordered table of `{key, label, description}`
//! records. The order is part of the user-facing protocol: users pick an
//! assistant persona by its 1-based position in [`ASSISTANT_ROLES`].

use std::fmt;

/// Description used when a stored role key is unknown or empty.
pub const UNKNOWN_ROLE_DESCRIPTION: &str = "توضیحی موجود نیست.";

/// One row of a role catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CatalogEntry<R: 'static> {
    /// Typed role.
    pub role: R,
    /// Stable storage key.
    pub key: &'static str,
    /// Label shown to users.
    pub label: &'static str,
    /// Persona or framing description given to the completion provider.
    pub description: &'static str,
}

/// Selectable assistant personas.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AssistantRole {
    GeneralPhysician,
    Surgeon,
    Psychologist,
    Psychiatrist,
    PainSpecialist,
    Cardiologist,
    Neurologist,
    Endocrinologist,
    Pediatrician,
    Dermatologist,
    Orthopedic,
}

/// Assistant persona catalog, in selection order.
pub const ASSISTANT_ROLES: &[CatalogEntry<AssistantRole>] = &[
    CatalogEntry {
        role: AssistantRole::GeneralPhysician,
        key: "general_physician",
        label: "پزشک عمومی",
        description: "شما یک پزشک عمومی بسیار با تجربه، متعهد به درمان بیماران، و بسیار با حوصله و با اخلاق هستید.",
    },
    CatalogEntry {
        role: AssistantRole::Surgeon,
        key: "surgeon",
        label: "جراح",
        description: "شما یک جراح متخصص با مهارت بسیار بالا در انجام جراحی‌های پیچیده و حساس هستید.",
    },
    CatalogEntry {
        role: AssistantRole::Psychologist,
        key: "psychologist",
        label: "روانشناس",
        description: "شما یک روانشناس با تجربه، مهربان و دلسوز برای کمک به سلامت روان افراد هستید.",
    },
    CatalogEntry {
        role: AssistantRole::Psychiatrist,
        key: "psychiatrist",
        label: "روانپزشک",
        description: "شما یک روانپزشک حرفه‌ای با توانایی تجویز دارو و ارائه مشاوره‌های روانپزشکی هستید.",
    },
    CatalogEntry {
        role: AssistantRole::PainSpecialist,
        key: "pain_specialist",
        label: "متخصص درد",
        description: "شما یک متخصص درد با تجربه در شناسایی و درمان انواع دردهای حاد و مزمن هستید.",
    },
    CatalogEntry {
        role: AssistantRole::Cardiologist,
        key: "cardiologist",
        label: "متخصص قلب",
        description: "شما یک متخصص قلب با دانش بالا در تشخیص و درمان بیماری‌های قلبی و عروقی هستید.",
    },
    CatalogEntry {
        role: AssistantRole::Neurologist,
        key: "neurologist",
        label: "متخصص مغز و اعصاب",
        description: "شما یک متخصص مغز و اعصاب با توانایی در مدیریت بیماری‌های سیستم عصبی هستید.",
    },
    CatalogEntry {
        role: AssistantRole::Endocrinologist,
        key: "endocrinologist",
        label: "متخصص غدد",
        description: "شما یک متخصص غدد با مهارت در شناسایی و درمان مشکلات هورمونی هستید.",
    },
    CatalogEntry {
        role: AssistantRole::Pediatrician,
        key: "pediatrician",
        label: "متخصص اطفال",
        description: "شما یک متخصص اطفال مهربان و دلسوز با تجربه در درمان بیماری‌های کودکان هستید.",
    },
    CatalogEntry {
        role: AssistantRole::Dermatologist,
        key: "dermatologist",
        label: "متخصص پوست",
        description: "شما یک متخصص پوست حرفه‌ای با توانایی در درمان بیماری‌ها و مشکلات پوستی هستید.",
    },
    CatalogEntry {
        role: AssistantRole::Orthopedic,
        key: "orthopedic",
        label: "متخصص ارتوپدی",
        description: "شما یک متخصص ارتوپدی ماهر در تشخیص و درمان مشکلات استخوان و مفاصل هستید.",
    },
];

impl AssistantRole {
    fn entry(self) -> &'static CatalogEntry<AssistantRole> {
        // Every variant has exactly one row.
        ASSISTANT_ROLES
            .iter()
            .find(|e| e.role == self)
            .unwrap_or(&ASSISTANT_ROLES[0])
    }

    /// Parse a stored key.
    pub fn from_key(key: &str) -> Option<Self> {
        ASSISTANT_ROLES.iter().find(|e| e.key == key).map(|e| e.role)
    }

    /// Look up a role by its 1-based position in the catalog.
    pub fn by_position(position: usize) -> Option<Self> {
        position
            .checked_sub(1)
            .and_then(|idx| ASSISTANT_ROLES.get(idx))
            .map(|e| e.role)
    }

    /// Storage key.
    pub fn as_str(self) -> &'static str {
        self.entry().key
    }

    /// Label shown to users.
    pub fn label(self) -> &'static str {
        self.entry().label
    }

    /// Persona description for the completion provider.
    pub fn description(self) -> &'static str {
        self.entry().description
    }

    /// Number of selectable personas.
    pub fn count() -> usize {
        ASSISTANT_ROLES.len()
    }
}

impl fmt::Display for AssistantRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Persona description for a stored assistant role key.
pub fn assistant_description(key: Option<&str>) -> &'static str {
    key.and_then(AssistantRole::from_key)
        .map(AssistantRole::description)
        .unwrap_or(UNKNOWN_ROLE_DESCRIPTION)
}

/// Session framing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SystemRole {
    #[default]
    Therapeutic,
    Diagnostic,
    Triage,
    Predictive,
    Educational,
    Research,
}

/// System role catalog.
pub const SYSTEM_ROLES: &[CatalogEntry<SystemRole>] = &[
    CatalogEntry {
        role: SystemRole::Therapeutic,
        key: "therapeutic",
        label: "سیستم درمانی",
        description: "تمرکز بر راهنمایی درمان و مراقبت.",
    },
    CatalogEntry {
        role: SystemRole::Diagnostic,
        key: "diagnostic",
        label: "سیستم تشخیصی",
        description: "تمرکز بر محدود کردن علت‌های احتمالی علائم.",
    },
    CatalogEntry {
        role: SystemRole::Triage,
        key: "triage",
        label: "سیستم تریاژ",
        description: "تمرکز بر فوریت و محل مناسب برای دریافت مراقبت.",
    },
    CatalogEntry {
        role: SystemRole::Predictive,
        key: "predictive",
        label: "سیستم پیش‌بینی",
        description: "تمرکز بر خطرها و پیامدهای محتمل.",
    },
    CatalogEntry {
        role: SystemRole::Educational,
        key: "educational",
        label: "سیستم آموزشی",
        description: "تمرکز بر توضیح ساده موضوعات سلامت.",
    },
    CatalogEntry {
        role: SystemRole::Research,
        key: "research",
        label: "سیستم پژوهشی",
        description: "تمرکز بر شواهد علمی موجود.",
    },
];

impl SystemRole {
    fn entry(self) -> &'static CatalogEntry<SystemRole> {
        SYSTEM_ROLES
            .iter()
            .find(|e| e.role == self)
            .unwrap_or(&SYSTEM_ROLES[0])
    }

    /// Parse a stored key.
    pub fn from_key(key: &str) -> Option<Self> {
        SYSTEM_ROLES.iter().find(|e| e.key == key).map(|e| e.role)
    }

    /// Storage key.
    pub fn as_str(self) -> &'static str {
        self.entry().key
    }

    /// Label shown to users.
    pub fn label(self) -> &'static str {
        self.entry().label
    }

    /// Framing description.
    pub fn description(self) -> &'static str {
        self.entry().description
    }
}

impl fmt::Display for SystemRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
