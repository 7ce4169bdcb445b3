//! The few fragments the client renders itself. Everything else comes from the server.

use crate::error::Error;
use crate::state::Player;

/// Status line shown while an agent is choosing its move.
pub fn thinking(player: Option<Player>) -> String {
    match player {
        Some(Player::Red) => r#"<div class="status">🤔 <strong style="color: var(--bs-danger);">Joueur Rouge</strong> réfléchit...</div>"#.to_string(),
        Some(Player::Blue) => r#"<div class="status">🤔 <strong style="color: var(--bs-primary);">Joueur Bleu</strong> réfléchit...</div>"#.to_string(),
        None => r#"<div class="status">🤔 Réflexion en cours...</div>"#.to_string(),
    }
}

pub fn failure(error: &Error) -> String {
    format!(
        r#"<div class="status error">⚠️ {}</div>"#,
        escape(&error.to_string())
    )
}

pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ApiError;

    #[test]
    fn thinking_label_names_the_pending_player() {
        assert!(thinking(Some(Player::Red)).contains("Joueur Rouge"));
        assert!(thinking(Some(Player::Blue)).contains("Joueur Bleu"));
        let generic = thinking(None);
        assert!(!generic.contains("Joueur"));
        assert!(generic.contains("Réflexion en cours"));
    }

    #[test]
    fn failure_banner_escapes_the_error_text() {
        let err = Error::Api(ApiError::Network {
            endpoint: "/api/move",
            reason: "<script>alert(1)</script> & more".into(),
        });
        let html = failure(&err);
        assert!(html.starts_with(r#"<div class="status error">"#));
        assert!(html.contains("&lt;script&gt;alert(1)&lt;/script&gt; &amp; more"));
        assert!(!html.contains("<script>"));
    }
}
