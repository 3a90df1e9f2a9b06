pub const MENSAGEM_MIN: usize = 10;
pub const MENSAGEM_MAX: usize = 2000;

/// Strip HTML markup from free text, keeping the visible content.
/// Runs before validation, so a message that is empty after stripping
/// fails the length check instead of being persisted blank.
pub fn strip_html(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut in_tag = false;
    for c in input.chars() {
        match c {
            '<' => in_tag = true,
            '>' if in_tag => in_tag = false,
            c if !in_tag => out.push(c),
            _ => {}
        }
    }
    out.trim().to_string()
}

/// Validate a proposal message (already sanitized): required, 10-2000 chars.
pub fn validate_mensagem(mensagem: &str) -> Option<String> {
    if mensagem.is_empty() {
        return Some("Mensagem é obrigatória".to_string());
    }
    let len = mensagem.chars().count();
    if len < MENSAGEM_MIN {
        return Some(format!("Mensagem deve ter pelo menos {MENSAGEM_MIN} caracteres"));
    }
    if len > MENSAGEM_MAX {
        return Some(format!("Mensagem deve ter no máximo {MENSAGEM_MAX} caracteres"));
    }
    None
}

/// Validate an optional response message (already sanitized; empty is OK).
pub fn validate_mensagem_resposta(mensagem: &str) -> Option<String> {
    if mensagem.chars().count() > MENSAGEM_MAX {
        return Some(format!("Mensagem deve ter no máximo {MENSAGEM_MAX} caracteres"));
    }
    None
}
