//! Geração de códigos de rota
//!
//! Códigos curtos alfanuméricos maiúsculos, únicos de forma
//! case-insensitive. A unicidade é garantida pelo repositório
//! (checagem + índice único); aqui só geramos candidatos.

use rand::Rng;

/// Alfabeto sem caracteres ambíguos (0/O, 1/I)
const ALPHABET: &[u8] = b"ABCDEFGHJKLMNPQRSTUVWXYZ23456789";

/// Comprimento padrão do código de rota
pub const CODE_LEN: usize = 6;

/// Gerar um candidato a código de rota
pub fn generate_code() -> String {
    let mut rng = rand::thread_rng();
    (0..CODE_LEN)
        .map(|_| {
            let idx = rng.gen_range(0..ALPHABET.len());
            ALPHABET[idx] as char
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_code_length() {
        assert_eq!(generate_code().len(), CODE_LEN);
    }

    #[test]
    fn test_generate_code_charset() {
        for _ in 0..100 {
            let code = generate_code();
            assert!(code
                .chars()
                .all(|c| c.is_ascii_uppercase() || c.is_ascii_digit()));
            assert!(!code.contains('0'));
            assert!(!code.contains('O'));
            assert!(!code.contains('1'));
            assert!(!code.contains('I'));
        }
    }
}
