//! Walks one browser through login, a few page views, and logout,
//! printing the cookies a real server would send.
//!
//! Run with `RUST_LOG=debug` to see the session layer's own events.
//! Set `ENCRYPTION_KEY` (64 hex chars) to use a fixed key; otherwise a
//! throwaway key is generated.

use std::collections::HashMap;

use cloakroom::prelude::*;
use rand::Rng;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
struct Visitor {
    name: String,
    visits: u32,
}

/// Stands in for the browser: remembers whatever `Set-Cookie` says.
#[derive(Default)]
struct Browser {
    cookies: HashMap<String, String>,
}

impl Browser {
    fn receive(&mut self, set_cookie: &str) {
        println!("  <- Set-Cookie: {set_cookie}");
        let pair = set_cookie.split(';').next().unwrap_or_default();
        if let Some((name, value)) = pair.split_once('=') {
            if value.is_empty() {
                self.cookies.remove(name);
            } else {
                self.cookies.insert(name.to_string(), value.to_string());
            }
        }
    }
}

async fn page_view(
    sessions: &SessionHandler<MemoryStore<Visitor>>,
    browser: &Browser,
) -> Result<(), CloakroomError> {
    match sessions.resolve_from_cookies(&browser.cookies).await? {
        Some(mut active) => {
            active.session.visits += 1;
            sessions.update(&active.session_id, &active.session).await?;
            println!(
                "  hello {}, this is visit #{}",
                active.session.name, active.session.visits
            );
        }
        None => println!("  hello stranger"),
    }
    Ok(())
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_tracing("info");

    let builder = if std::env::var("ENCRYPTION_KEY").is_ok() {
        Cloakroom::builder().key_from_env("ENCRYPTION_KEY")
    } else {
        tracing::warn!("ENCRYPTION_KEY not set, using a throwaway key");
        let key: [u8; 32] = rand::rng().random();
        Cloakroom::builder().key(hex::encode(key))
    };
    let sessions = builder
        .store_config(StoreConfig::default().with_cookie_name("visit_sid"))
        .build_in_memory::<Visitor>()?;

    let mut browser = Browser::default();

    println!("GET / (no cookie)");
    page_view(&sessions, &browser).await?;

    println!("POST /login");
    let token = sessions
        .create(&Visitor {
            name: "ada".into(),
            visits: 0,
        })
        .await?;
    browser.receive(&sessions.create_cookie_string(&token));

    for _ in 0..3 {
        println!("GET /");
        page_view(&sessions, &browser).await?;
    }

    println!("GET / (tampered cookie)");
    let mut forged = Browser::default();
    let mut value = token.clone();
    value.replace_range(..2, if token.starts_with("00") { "01" } else { "00" });
    forged.cookies.insert(sessions.cookie_name().to_string(), value);
    page_view(&sessions, &forged).await?;

    println!("POST /logout");
    if let Some(active) = sessions.resolve_from_cookies(&browser.cookies).await? {
        browser.receive(&sessions.delete_and_clear(&active.session_id).await?);
    }

    println!("GET / (old token replayed)");
    forged.cookies.insert(sessions.cookie_name().to_string(), token);
    page_view(&sessions, &forged).await?;

    Ok(())
}
