use crate::cli::commands::LoginArgs;
use crate::cli::output::WhoamiJson;
use crate::io::state::Session;

use super::Context;

pub fn cmd_login(args: LoginArgs, ctx: &Context) -> Result<(), Box<dyn std::error::Error>> {
    let (mut session, _lock) = Session::open_dir_locked(&ctx.data_dir, &ctx.config)?;
    let user = session.sign_in(&args.name)?;
    println!("signed in as {}", user.name);
    Ok(())
}

pub fn cmd_logout(ctx: &Context) -> Result<(), Box<dyn std::error::Error>> {
    let (mut session, _lock) = Session::open_dir_locked(&ctx.data_dir, &ctx.config)?;
    if !session.is_signed_in() {
        println!("not signed in");
        return Ok(());
    }
    session.sign_out()?;
    println!("signed out");
    Ok(())
}

pub fn cmd_whoami(ctx: &Context) -> Result<(), Box<dyn std::error::Error>> {
    let session = Session::open_dir(&ctx.data_dir, &ctx.config)?;
    let name = session.user().map(|u| u.name.clone());

    if ctx.json {
        let out = WhoamiJson {
            signed_in: name.is_some(),
            name,
        };
        println!("{}", serde_json::to_string_pretty(&out)?);
    } else {
        match name {
            Some(name) => println!("{}", name),
            None => println!("not signed in"),
        }
    }
    Ok(())
}
