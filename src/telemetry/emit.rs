use anyhow::Result;
use serde::Serialize;

use crate::output::config::OutputConfig;
use crate::output::types::{Envelope, Meta};
use crate::output::Emitter;

pub fn print_plan<T: Serialize>(cfg: OutputConfig, op: &'static str, plan: &T, meta: Option<Meta>) -> Result<()> {
    let env = Envelope::plan(op, plan, meta)?;
    Emitter::from_config(cfg).emit(&env)?;
    Ok(())
}

pub fn print_result<T: Serialize>(cfg: OutputConfig, op: &'static str, result: &T, meta: Option<Meta>) -> Result<()> {
    let env = Envelope::result(op, result, meta)?;
    Emitter::from_config(cfg).emit(&env)?;
    Ok(())
}
