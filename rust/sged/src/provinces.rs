/// Provinces in the order forms list them, each with its principal districts.
pub const PROVINCES: &[(&str, &[&str])] = &[
    (
        "Maputo Cidade",
        &["KaMpfumo", "Nlhamankulu", "KaMaxakeni", "KaMubukwana", "KaNyaka"],
    ),
    (
        "Maputo Província",
        &["Matola", "Boane", "Moamba", "Marracuene", "Namaacha"],
    ),
    (
        "Gaza",
        &["Xai-Xai", "Chókwè", "Chibuto", "Manjacaze", "Bilene"],
    ),
    (
        "Inhambane",
        &["Inhambane", "Maxixe", "Massinga", "Vilankulo", "Inhassoro"],
    ),
    (
        "Sofala",
        &["Beira", "Dondo", "Nhamatanda", "Buzi", "Gorongosa"],
    ),
    (
        "Manica",
        &["Chimoio", "Manica", "Gondola", "Sussundenga", "Macossa"],
    ),
    (
        "Tete",
        &["Tete", "Moatize", "Cahora Bassa", "Changara", "Mutarara"],
    ),
    (
        "Zambézia",
        &["Quelimane", "Mocuba", "Milange", "Gurué", "Alto Molócuè"],
    ),
    (
        "Nampula",
        &["Nampula", "Nacala", "Ilha de Moçambique", "Angoche", "Monapo"],
    ),
    (
        "Niassa",
        &["Lichinga", "Cuamba", "Mandimba", "Sanga", "Majune"],
    ),
    (
        "Cabo Delgado",
        &["Pemba", "Montepuez", "Mueda", "Mocímboa da Praia", "Palma"],
    ),
];

pub fn province_names() -> impl Iterator<Item = &'static str> {
    PROVINCES.iter().map(|(name, _)| *name)
}

pub fn districts_of(province: &str) -> Option<&'static [&'static str]> {
    PROVINCES
        .iter()
        .find(|(name, _)| *name == province)
        .map(|(_, districts)| *districts)
}

/// A district is only meaningful together with its province; changing the
/// province clears it.
pub fn is_district_of(province: &str, district: &str) -> bool {
    districts_of(province)
        .map(|ds| ds.iter().any(|d| *d == district))
        .unwrap_or(false)
}
