// Normalização de telefones para o canal WhatsApp.
//
// O provedor identifica os números como "whatsapp:+5511999998888"; no banco
// o telefone do cliente é texto livre ("+55 (11) 99999-8888"). Tudo é
// reduzido a dígitos antes de comparar ou enviar.

/// Quantidade de dígitos usada no casamento por sufixo: número local sem
/// o código do país.
pub const MATCH_SUFFIX_LEN: usize = 10;

/// Remove o prefixo de canal ("whatsapp:") e tudo que não for dígito.
pub fn digits_only(raw: &str) -> String {
    raw.trim()
        .strip_prefix("whatsapp:")
        .unwrap_or(raw.trim())
        .chars()
        .filter(|c| c.is_ascii_digit())
        .collect()
}

/// Sufixo usado no casamento permissivo de números recebidos.
/// Números que compartilham o mesmo final colidem; risco conhecido do
/// casamento por substring.
pub fn match_suffix(digits: &str) -> &str {
    if digits.len() > MATCH_SUFFIX_LEN {
        &digits[digits.len() - MATCH_SUFFIX_LEN..]
    } else {
        digits
    }
}

/// Formato de destino exigido pelo provedor: "whatsapp:+<dígitos>".
pub fn whatsapp_address(digits: &str) -> String {
    format!("whatsapp:+{}", digits)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn digits_only_strips_channel_prefix_and_punctuation() {
        assert_eq!(digits_only("whatsapp:+905551112233"), "905551112233");
        assert_eq!(digits_only("+55 (11) 99999-8888"), "5511999998888");
        assert_eq!(digits_only("  whatsapp:+1 415 555 0100 "), "14155550100");
    }

    #[test]
    fn digits_only_keeps_plain_numbers() {
        assert_eq!(digits_only("5551112233"), "5551112233");
        assert_eq!(digits_only(""), "");
    }

    #[test]
    fn match_suffix_drops_country_code() {
        assert_eq!(match_suffix("905551112233"), "5551112233");
        assert_eq!(match_suffix("5511999998888"), "1999998888");
    }

    #[test]
    fn match_suffix_uses_whole_number_when_short() {
        assert_eq!(match_suffix("5551112233"), "5551112233");
        assert_eq!(match_suffix("1122"), "1122");
    }

    #[test]
    fn whatsapp_address_has_channel_prefix() {
        assert_eq!(whatsapp_address("905551112233"), "whatsapp:+905551112233");
    }
}
