use crate::cli::commands::{confirm, open_portal};
use crate::cli::parser::{Commands, MemberAction};
use crate::config::Config;
use crate::core::team::TeamLogic;
use crate::errors::AppResult;
use crate::ui::messages::info;
use crate::utils::table::Table;
use std::path::Path;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    let Commands::Member { action } = cmd else {
        return Ok(());
    };

    let mut portal = open_portal(cfg)?;

    match action {
        MemberAction::Add { name, phone } => {
            TeamLogic::add(&mut portal, name, phone.as_deref())?;
        }

        MemberAction::List => {
            if portal.sewadars().is_empty() {
                println!("The roster is empty. Add sewadars with `sewalogger member add <name>`.");
                return Ok(());
            }

            let mut table = Table::new(&["Id", "Name", "Phone", "Avatar"]);
            for s in portal.sewadars() {
                table.add_row(vec![
                    s.id.clone(),
                    s.name.clone(),
                    s.phone_number.clone().unwrap_or_else(|| "--".into()),
                    if s.avatar.is_some() { "yes" } else { "--" }.to_string(),
                ]);
            }
            print!("{}", table.render());
            println!("\n{} sewadar(s)", portal.sewadars().len());
        }

        MemberAction::Update {
            id,
            name,
            phone,
            avatar,
        } => {
            TeamLogic::update(
                &mut portal,
                id,
                name.as_deref(),
                phone.as_deref(),
                avatar.as_deref().map(Path::new),
            )?;
        }

        MemberAction::Del { id, yes } => {
            if !*yes && !confirm(&format!("Remove sewadar {id} from the roster?"))? {
                info("Nothing removed.");
                return Ok(());
            }
            TeamLogic::remove(&mut portal, id)?;
        }
    }

    Ok(())
}
