//! Fixed label sets highlighted in plan text
//!
//! Labels are written by the backend as `**Label:**`.

/// Section labels for accommodation, food, activities, transport and meals
pub const CATEGORY_LABELS: &[&str] = &[
    "Konaklama",
    "Yemek",
    "Aktivite",
    "Ulaşım",
    "Tur",
    "Sabah",
    "Öğle",
    "Akşam",
    "Öğle Yemeği",
    "Akşam Yemeği",
    "Kahvaltı",
    "Öğleden Sonra",
];

/// Cost and budget labels
pub const COST_LABELS: &[&str] = &[
    "Maliyet",
    "Bütçe",
    "Tahmini Maliyet",
    "Günlük Maliyet",
    "Toplam Maliyet",
    "Toplam Tahmini Maliyet",
];

/// Tip, warning and note labels
pub const TIP_LABELS: &[&str] = &[
    "İpucu",
    "Uyarı",
    "İletişim",
    "Ekstra İpuçları",
    "Temel Korece",
    "Genel İpuçları",
    "Not",
];

/// Kind of a recognized bold label
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LabelKind {
    Category,
    Cost,
    Tip,
}

impl LabelKind {
    /// CSS classes of the `<strong>` element for this label
    pub fn css_class(self) -> &'static str {
        match self {
            LabelKind::Category => "category-heading",
            LabelKind::Cost => "text-success category-heading",
            LabelKind::Tip => "tip-heading",
        }
    }
}

/// Classify the inner text of a bold span (`Konaklama:` for `**Konaklama:**`)
pub fn classify(bold_text: &str) -> Option<LabelKind> {
    let name = bold_text.trim().strip_suffix(':')?.trim_end();

    if CATEGORY_LABELS.contains(&name) {
        Some(LabelKind::Category)
    } else if COST_LABELS.contains(&name) {
        Some(LabelKind::Cost)
    } else if TIP_LABELS.contains(&name) {
        Some(LabelKind::Tip)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_labels() {
        assert_eq!(classify("Konaklama:"), Some(LabelKind::Category));
        assert_eq!(classify("Öğle Yemeği:"), Some(LabelKind::Category));
        assert_eq!(classify("Toplam Tahmini Maliyet:"), Some(LabelKind::Cost));
        assert_eq!(classify("İpucu:"), Some(LabelKind::Tip));
        assert_eq!(classify(" Not: "), Some(LabelKind::Tip));
    }

    #[test]
    fn test_classify_requires_colon_and_exact_name() {
        assert_eq!(classify("Konaklama"), None);
        assert_eq!(classify("Konaklama Önerisi:"), None);
        assert_eq!(classify("Seul:"), None);
    }
}
