use std::collections::HashMap;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use axum::extract::{Extension, State};
use axum::http::{StatusCode, header};
use axum::middleware::{self, Next};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use clap::Parser;
use tokio::sync::RwLock;

#[path = "voltix_server/types.rs"]
mod types;
use self::types::*;
#[path = "voltix_server/identity_store.rs"]
mod identity_store;
use self::identity_store::*;
#[path = "voltix_server/http_error.rs"]
mod http_error;
use self::http_error::*;
#[path = "voltix_server/handlers_auth.rs"]
mod handlers_auth;
use self::handlers_auth::*;
#[path = "voltix_server/handlers_me.rs"]
mod handlers_me;
use self::handlers_me::*;
#[path = "voltix_server/runtime.rs"]
mod runtime;

#[tokio::main]
async fn main() {
    if let Err(err) = runtime::run().await {
        eprintln!("{:#}", err);
        std::process::exit(1);
    }
}
