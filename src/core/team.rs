//! Roster management (`member` command).

use crate::core::portal::Portal;
use crate::db::store::Store;
use crate::errors::{AppError, AppResult};
use crate::models::sewadar::{NewSewadar, Sewadar, SewadarUpdate};
use crate::ui::messages::{info, success};
use crate::utils::avatar::load_avatar;
use std::path::Path;

fn clean_phone(phone: Option<&str>) -> AppResult<Option<String>> {
    let Some(p) = phone.map(str::trim) else {
        return Ok(None);
    };

    let digits = p.chars().filter(|c| c.is_ascii_digit()).count();
    let allowed = p
        .chars()
        .all(|c| c.is_ascii_digit() || matches!(c, '+' | ' ' | '-' | '(' | ')'));

    if !allowed || digits < 6 {
        return Err(AppError::InvalidPhone(p.to_string()));
    }
    Ok(Some(p.to_string()))
}

pub struct TeamLogic;

impl TeamLogic {
    pub fn add<S: Store>(
        portal: &mut Portal<S>,
        name: &str,
        phone: Option<&str>,
    ) -> AppResult<Sewadar> {
        let s = portal.add_member(NewSewadar {
            name: name.trim().to_string(),
            phone_number: clean_phone(phone)?,
        })?;
        success(format!("Added {} ({})", s.name, s.id));
        Ok(s)
    }

    pub fn update<S: Store>(
        portal: &mut Portal<S>,
        id: &str,
        name: Option<&str>,
        phone: Option<&str>,
        avatar: Option<&Path>,
    ) -> AppResult<Sewadar> {
        let update = SewadarUpdate {
            name: name.map(str::to_string),
            avatar: avatar.map(load_avatar).transpose()?,
            phone_number: clean_phone(phone)?,
        };

        if update.is_empty() {
            info("Nothing to update (use --name, --phone or --avatar).");
            return portal
                .sewadar(id)
                .cloned()
                .ok_or_else(|| AppError::SewadarNotFound(id.to_string()));
        }

        let s = portal.update_member(id, update)?;
        success(format!("Updated {} ({})", s.name, s.id));
        Ok(s)
    }

    /// Remove from the roster. Attendance history of the volunteer is kept.
    pub fn remove<S: Store>(portal: &mut Portal<S>, id: &str) -> AppResult<Sewadar> {
        let kept = portal.records().iter().filter(|r| r.sewadar_id == id).count();
        let s = portal.remove_member(id)?;

        success(format!("Removed {} from the roster", s.name));
        if kept > 0 {
            info(format!("{kept} attendance record(s) of {} are kept.", s.name));
        }
        Ok(s)
    }
}
