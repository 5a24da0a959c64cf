//! Background network requests for the UI. Calls run on worker threads and
//! report back over a channel; all session mutation stays on the UI thread.

use std::sync::mpsc::Sender;
use std::thread;

use crate::entry::EntryRequest;
use crate::model::UserProfile;
use crate::remote::{AuthApi, AuthClient, AuthError};
use crate::session::ResolutionTicket;

pub(super) enum NetEvent {
    Entry(Result<String, AuthError>),
    Resolution(ResolutionTicket, Result<UserProfile, AuthError>),
}

pub(super) fn spawn_entry_request(tx: Sender<NetEvent>, client: AuthClient, req: EntryRequest) {
    thread::spawn(move || {
        let outcome = match &req {
            EntryRequest::Login { email, password } => client.login(email, password),
            EntryRequest::Register { email, password } => client.register(email, password),
            EntryRequest::Exchange { assertion } => client.exchange_identity(assertion),
        };
        let _ = tx.send(NetEvent::Entry(outcome));
    });
}

pub(super) fn spawn_resolution(tx: Sender<NetEvent>, client: AuthClient, ticket: ResolutionTicket) {
    thread::spawn(move || {
        let outcome = client.me(ticket.credential());
        let _ = tx.send(NetEvent::Resolution(ticket, outcome));
    });
}
