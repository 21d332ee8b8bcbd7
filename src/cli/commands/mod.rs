pub mod add;
pub mod config;
pub mod db;
pub mod del;
pub mod import;
pub mod init;
pub mod list;
pub mod log;
pub mod member;
pub mod out;
pub mod report;

use crate::config::Config;
use crate::core::portal::Portal;
use crate::db::pool::DbPool;
use crate::errors::AppResult;
use std::io::{self, Write};

/// Open the configured database (schema upgraded) and load the portal state.
pub(crate) fn open_portal(cfg: &Config) -> AppResult<Portal<DbPool>> {
    let pool = DbPool::open(&cfg.database_path())?;
    Portal::load(pool)
}

/// `[y/N]` prompt on stdin; anything but y/yes is a no.
pub(crate) fn confirm(question: &str) -> AppResult<bool> {
    print!("{question} [y/N]: ");
    io::stdout().flush().ok();

    let mut answer = String::new();
    io::stdin().read_line(&mut answer)?;
    let ans = answer.trim().to_ascii_lowercase();
    Ok(ans == "y" || ans == "yes")
}
