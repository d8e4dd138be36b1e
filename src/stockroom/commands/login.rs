use crate::auth::AuthChecker;
use crate::commands::{CmdMessage, CmdResult, DataPaths};
use crate::error::{Result, StockroomError};
use crate::session::Session;
use crate::store::{StorageBackend, UserStore};

/// Verify credentials and start a session.
pub fn login<B: StorageBackend>(
    users: &mut UserStore<B>,
    paths: &DataPaths,
    username: &str,
    password: &str,
) -> Result<CmdResult> {
    let role = AuthChecker::new(users)
        .verify_login(username, password)?
        .ok_or(StockroomError::InvalidCredentials)?;

    let session = Session::new(username, role);
    session.save(paths.dir())?;

    let mut result = CmdResult::default();
    result.add_message(CmdMessage::success(format!("Welcome, {}!", username)));
    Ok(result.with_session(session))
}

pub fn logout(paths: &DataPaths) -> Result<CmdResult> {
    let mut result = CmdResult::default();
    if Session::clear(paths.dir())? {
        result.add_message(CmdMessage::success("Logged out."));
    } else {
        result.add_message(CmdMessage::info("Not logged in."));
    }
    Ok(result)
}

pub fn whoami(paths: &DataPaths) -> Result<CmdResult> {
    let session = Session::require(paths.dir())?;
    Ok(CmdResult::default().with_session(session))
}
