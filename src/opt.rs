use std::collections::HashMap;
use std::fmt::{Debug, Display};
use std::{env, result};

use lazy_static::lazy_static;

pub type Res<T> = Result<T, String>;

pub trait ErrToStr<T, E: Display> {
    fn err_to_str(self) -> Res<T>;
}

impl<T, E: Display> ErrToStr<T, E> for result::Result<T, E> {
    fn err_to_str(self) -> Res<T> {
        self.map_err(|err| err.to_string())
    }
}

#[derive(strum_macros::Display, Eq, PartialEq, Debug, Hash, Clone, Copy)]
pub enum DbgFlg {
    #[strum(serialize = "DBG_FLG_DRAFT")]
    Draft,
    #[strum(serialize = "DBG_FLG_PROVIDER")]
    Provider,
    #[strum(serialize = "DBG_FLG_CLI")]
    Cli,
}

lazy_static! {
    pub static ref DBG_FLG_DEFAULTS: HashMap<DbgFlg, bool> = HashMap::from([
        (DbgFlg::Draft, false),
        (DbgFlg::Provider, true),
        (DbgFlg::Cli, false),
    ]);
}

pub trait DebugIf: Debug {
    fn dbg_if(&self, flg: DbgFlg);
}

impl<T: Debug> DebugIf for T {
    fn dbg_if(&self, flg: DbgFlg)
    where
        Self: Debug,
    {
        if checkflag(&flg) {
            dbg!(self);
        }
    }
}

pub fn log_if(s: &str, flg: DbgFlg) {
    if checkflag(&flg) {
        println!("{} {}", utc_now(), s);
    }
}

const ID_ALPHABET: &str = "abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";

/// Random alphanumeric id, safe to pass back as a REPL argument.
pub fn new_id(len: usize) -> String {
    nanoid::nanoid!(len, &ID_ALPHABET.chars().collect::<Vec<char>>())
}

fn utc_now() -> String {
    chrono::Utc::now().to_rfc3339_opts(chrono::SecondsFormat::Secs, true)
}

fn flag_value(flg: &DbgFlg, env_value: Option<String>) -> bool {
    env_value.map_or_else(
        || DBG_FLG_DEFAULTS.get(flg).copied().unwrap_or(false),
        |s| s == "1" || s.eq_ignore_ascii_case("true"),
    )
}

fn checkflag(flg: &DbgFlg) -> bool {
    flag_value(flg, env::var(flg.to_string()).ok())
}
