use lgpd_core::FieldClass;

/// Keywords marking documents, credentials and payment data. Checked first.
pub const SENSITIVE_KEYWORDS: &[&str] = &[
    "cpf",
    "rg",
    "documento",
    "senha",
    "password",
    "cartao",
    "credito",
];

/// Keywords marking identifying personal data.
pub const PERSONAL_KEYWORDS: &[&str] = &[
    "nome",
    "email",
    "telefone",
    "endereco",
    "nascimento",
    "idade",
];

/// Classify a form field from its name, input kind and label.
///
/// Sensitive keywords win over personal ones: a field hitting both lists is
/// always [`FieldClass::Sensitive`].
#[must_use]
pub fn classify_field(name: &str, input_kind: &str, label: &str) -> FieldClass {
    let full_text = format!("{name} {input_kind} {label}").to_lowercase();

    if contains_any(&full_text, SENSITIVE_KEYWORDS) {
        FieldClass::Sensitive
    } else if contains_any(&full_text, PERSONAL_KEYWORDS) {
        FieldClass::Personal
    } else {
        FieldClass::Regular
    }
}

fn contains_any(text: &str, keywords: &[&str]) -> bool {
    keywords.iter().any(|keyword| text.contains(keyword))
}
