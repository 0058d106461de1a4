use serde::Serialize;

use crate::cmd::VersionArgs;
use crate::exit::{CliResult, SUCCESS};
use crate::output::OutputFormat;

#[derive(Serialize)]
struct BuildInfo {
    name: &'static str,
    version: &'static str,
    build_target: &'static str,
    build_profile: &'static str,
    target_os: &'static str,
    target_arch: &'static str,
    git_hash: &'static str,
    async_codec: bool,
}

impl BuildInfo {
    fn current() -> Self {
        Self {
            name: env!("CARGO_PKG_NAME"),
            version: env!("CARGO_PKG_VERSION"),
            build_target: option_env!("SENSORFEAT_BUILD_TARGET").unwrap_or("unknown"),
            build_profile: option_env!("SENSORFEAT_BUILD_PROFILE").unwrap_or("unknown"),
            target_os: std::env::consts::OS,
            target_arch: std::env::consts::ARCH,
            git_hash: option_env!("SENSORFEAT_GIT_HASH").unwrap_or("unknown"),
            async_codec: cfg!(feature = "async"),
        }
    }

    fn lines(&self) -> Vec<String> {
        vec![
            format!("name: {}", self.name),
            format!("version: {}", self.version),
            format!("build_target: {}", self.build_target),
            format!("build_profile: {}", self.build_profile),
            format!("target: {}/{}", self.target_os, self.target_arch),
            format!("git_hash: {}", self.git_hash),
            format!("async_codec: {}", self.async_codec),
        ]
    }
}

pub fn run(args: VersionArgs, format: OutputFormat) -> CliResult<i32> {
    let info = BuildInfo::current();
    if !args.extended {
        println!("{} {}", info.name, info.version);
        return Ok(SUCCESS);
    }

    match format {
        OutputFormat::Json => println!(
            "{}",
            serde_json::to_string(&info).unwrap_or_else(|_| "{}".to_string())
        ),
        _ => {
            for line in info.lines() {
                println!("{line}");
            }
        }
    }
    Ok(SUCCESS)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extended_lines_name_the_package() {
        let lines = BuildInfo::current().lines();
        assert_eq!(lines[0], "name: sensorfeat");
        assert!(lines[1].starts_with("version: "));
    }
}
