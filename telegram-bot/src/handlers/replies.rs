//! Reply texts that only depend on settings and the provider registry.

use std::fmt::Write;

use bot_settings::{registry, Settings, PROVIDERS};
use completion_client::mask_token;

use crate::commands::help_text;

pub fn welcome_text() -> String {
    format!(
        "Hi! I generate Telegram bot projects with an LLM and can publish them to GitHub.\n\n\
         1. /set_api_key <provider> <key>\n\
         2. /set_model <provider> <model>\n\
         3. /set_github_token <token> (optional)\n\
         4. /code <what the bot should do>\n\n{}",
        help_text()
    )
}

pub fn list_providers_text(settings: &Settings) -> String {
    let active = settings.active_provider_or_default();
    let mut out = String::from("Providers:\n");
    for p in PROVIDERS {
        let marker = if p.id == active { " (active)" } else { "" };
        let ready = if settings.is_provider_ready(p.id) {
            "ready"
        } else {
            "not configured"
        };
        let _ = writeln!(out, "• {} ({}){}: {}", p.id, p.display_name, marker, ready);
    }
    out.push_str("\nSelect one with /select_provider <provider>");
    out
}

/// Suggested models for one provider, or for all of them when `provider` is empty.
pub fn list_models_text(provider: &str) -> Option<String> {
    let providers: Vec<_> = if provider.trim().is_empty() {
        PROVIDERS.iter().collect()
    } else {
        vec![registry::lookup(provider)?]
    };
    let mut out = String::from("Available models:\n");
    for p in providers {
        let _ = writeln!(out, "\n{}:", p.display_name);
        for model in p.known_models {
            let _ = writeln!(out, "• {}", model);
        }
    }
    out.push_str("\nAny other model id accepted by the provider also works with /set_model.");
    Some(out)
}

/// Current settings with every secret masked.
pub fn settings_summary(settings: &Settings) -> String {
    let active = settings.active_provider_or_default();
    let mut out = String::new();
    let _ = writeln!(
        out,
        "Active provider: {}{}",
        active,
        if settings.active_provider().is_none() {
            " (default)"
        } else {
            ""
        }
    );
    let _ = writeln!(
        out,
        "GitHub token: {}",
        settings.github_token().map(mask_token).unwrap_or_else(|| "not set".to_string())
    );

    let mut any = false;
    for p in PROVIDERS {
        let key = settings.api_key(p.id);
        let model = settings.model(p.id);
        let endpoint = settings.endpoint(p.id);
        if key.is_none() && model.is_none() && endpoint.is_none() {
            continue;
        }
        any = true;
        let _ = writeln!(
            out,
            "\n{}:\n  model: {}\n  key: {}\n  endpoint: {}",
            p.id,
            model.unwrap_or("not set"),
            key.map(mask_token).unwrap_or_else(|| "not set".to_string()),
            endpoint.unwrap_or("default"),
        );
    }
    if !any {
        out.push_str("\nNo provider configured yet. Start with /set_api_key.");
    }
    out
}
