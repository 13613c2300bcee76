//! Confport CLI. Turns single-platform toolchain configuration headers into
//! portable multi-architecture headers.

mod commands;
mod manifest;

use std::path::PathBuf;
use std::process;

use clap::{ArgAction, Parser, Subcommand};

use manifest::Project;

#[derive(Parser)]
#[command(
    name = "confport",
    version,
    about = "Portable configuration header generator"
)]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,
    /// Path to confport.toml (default: search upward from the current directory)
    #[arg(long, global = true)]
    manifest: Option<PathBuf>,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Build the toolchain and regenerate the common and platform headers
    Update {
        /// Host platform (e.g., android, linux)
        platform: String,
        /// Parallel build jobs (default: available cores)
        #[arg(short, long)]
        jobs: Option<usize>,
        /// Reuse the existing build directory instead of rebuilding
        #[arg(long)]
        skip_build: bool,
    },
    /// Rewrite a single configuration header
    Transform {
        /// Input header
        file: PathBuf,
        /// Host platform whose triples are used
        #[arg(long)]
        platform: String,
        /// Output file (default: stdout)
        #[arg(long)]
        output: Option<PathBuf>,
    },
    /// Inspect host platforms
    Platform {
        #[command(subcommand)]
        action: PlatformAction,
    },
    /// Validate or generate table files
    Tables {
        #[command(subcommand)]
        action: TablesAction,
    },
    /// Write a default confport.toml in the current directory
    Init {
        /// Overwrite an existing confport.toml
        #[arg(long)]
        force: bool,
    },
    /// Check toolchain and project status
    Doctor,
    /// Remove the native build directory
    Clean {
        /// Also remove the generated configuration trees
        #[arg(long)]
        outputs: bool,
    },
}

#[derive(Subcommand)]
enum PlatformAction {
    /// List available host platforms
    List,
    /// Show the triple table of a platform
    Describe {
        /// Platform name
        name: String,
        /// Output format (default: human-readable, "toml" or "json")
        #[arg(long)]
        format: Option<String>,
    },
}

#[derive(Subcommand)]
enum TablesAction {
    /// Validate a tables file (default: the active tables)
    Validate {
        /// Tables file
        file: Option<PathBuf>,
    },
    /// Print a tables file seeded from the built-in tables
    Template,
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let result = run(cli);
    if let Err(e) = result {
        eprintln!("error: {e:#}");
        process::exit(1);
    }
}

/// Install the stderr log subscriber; `RUST_LOG` overrides the `-v` level.
fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let cwd = std::env::current_dir()?;

    let project = || Project::discover(cli.manifest.as_deref(), &cwd);

    match cli.command {
        Commands::Init { force } => commands::init::run(&cwd, force),

        Commands::Update {
            platform,
            jobs,
            skip_build,
        } => commands::update::run(&project()?, &platform, jobs, skip_build),

        Commands::Transform {
            file,
            platform,
            output,
        } => commands::transform::run(&project()?, &file, &platform, output.as_deref()),

        Commands::Platform { action } => match action {
            PlatformAction::List => commands::platform::list(&project()?),
            PlatformAction::Describe { name, format } => {
                commands::platform::describe(&project()?, &name, format.as_deref())
            }
        },

        Commands::Tables { action } => match action {
            TablesAction::Validate { file } => {
                commands::tables::validate(&project()?, file.as_deref())
            }
            TablesAction::Template => commands::tables::template(),
        },

        Commands::Doctor => commands::doctor::run(&project()?),

        Commands::Clean { outputs } => commands::clean::run(&project()?, outputs),
    }
}

#[cfg(test)]
mod integration_tests {
    use super::*;
    use std::fs;
    use std::path::Path;

    const LLVM_CONFIG_H: &str = "\
#ifndef LLVM_CONFIG_H
#define LLVM_CONFIG_H
#define LLVM_DEFAULT_TARGET_TRIPLE \"x86_64-unknown-linux-gnu\"
#define LLVM_HOST_TRIPLE \"x86_64-unknown-linux-gnu\"
#define LLVM_NATIVE_ARCH X86
#define LLVM_NATIVE_ASMPARSER LLVMInitializeX86AsmParser
#define LLVM_NATIVE_ASMPRINTER LLVMInitializeX86AsmPrinter
#define LLVM_NATIVE_DISASSEMBLER LLVMInitializeX86Disassembler
#define LLVM_NATIVE_TARGET LLVMInitializeX86Target
#define LLVM_NATIVE_TARGETINFO LLVMInitializeX86TargetInfo
#define LLVM_NATIVE_TARGETMC LLVMInitializeX86TargetMC
#define LLVM_VERSION_MAJOR 7
#endif
";

    /// Lay out what a native build leaves in the build directory.
    fn fake_build_outputs(objs: &Path) {
        for subdir in confport_rewrite::Layout::default_common_subdirs() {
            let dir = objs.join(&subdir);
            fs::create_dir_all(&dir).unwrap();
            fs::write(dir.join("Gen.inc"), format!("// {}\n", subdir.display())).unwrap();
        }
        let config = objs.join("include/llvm/Config");
        fs::create_dir_all(&config).unwrap();
        fs::write(config.join("llvm-config.h"), LLVM_CONFIG_H).unwrap();
        fs::write(
            config.join("config.h"),
            "#define HAVE_BACKTRACE TRUE\n#define HAVE_UNISTD_H 1\n",
        )
        .unwrap();
        fs::write(
            config.join("AsmParsers.def"),
            "LLVM_ASM_PARSER(AArch64)\nLLVM_ASM_PARSER(ARM)\nLLVM_ASM_PARSER(X86)\n#undef LLVM_ASM_PARSER\n",
        )
        .unwrap();
    }

    /// Full workflow: init → doctor → update (reusing build outputs) → clean.
    #[test]
    fn init_update_clean_workflow() {
        let dir = tempfile::tempdir().unwrap();
        let project_path = dir.path().join("update");
        fs::create_dir_all(&project_path).unwrap();

        // 1. Init
        commands::init::run(&project_path, false).unwrap();
        let project = Project::discover(None, &project_path).unwrap();
        assert_eq!(project.root, project_path);

        // 2. Doctor
        commands::doctor::run(&project).unwrap();

        // 3. Update without running cmake
        fake_build_outputs(&project.objs_dir());
        commands::update::run(&project, "android", Some(2), true).unwrap();

        let configs = dir.path().join("configs");
        assert_eq!(
            fs::read_to_string(configs.join("common/lib/Target/X86/Gen.inc")).unwrap(),
            "// lib/Target/X86\n"
        );
        let out = configs.join("android/include/llvm/Config");
        let llvm_config = fs::read_to_string(out.join("llvm-config.h")).unwrap();
        assert!(llvm_config.contains("#define LLVM_HOST_TRIPLE \"i686-linux-android\"\n"));
        assert!(llvm_config
            .contains("#elif defined(__arm__)\n#define LLVM_NATIVE_ASMPARSER LLVMInitializeARMAsmParser\n"));
        assert!(llvm_config.contains("#define LLVM_NATIVE_TARGETMC LLVMInitializeAArch64TargetMC\n"));
        assert!(llvm_config.contains("#define LLVM_VERSION_MAJOR 7\n"));

        let config_h = fs::read_to_string(out.join("config.h")).unwrap();
        assert_eq!(
            config_h,
            "/* #undef HAVE_BACKTRACE */\n#define HAVE_UNISTD_H 1\n"
        );

        let asm_parsers = fs::read_to_string(out.join("AsmParsers.def")).unwrap();
        assert!(asm_parsers.starts_with("#if defined(__aarch64__)\nLLVM_ASM_PARSER(AArch64)\n#endif\n"));
        assert!(asm_parsers.ends_with("#endif\n#undef LLVM_ASM_PARSER\n"));

        // Regenerating produces identical bytes
        commands::update::run(&project, "android", Some(2), true).unwrap();
        assert_eq!(
            fs::read_to_string(out.join("llvm-config.h")).unwrap(),
            llvm_config
        );

        // 4. Clean
        commands::clean::run(&project, false).unwrap();
        assert!(!project.objs_dir().exists());
        assert!(configs.join("android").exists());
    }

    #[test]
    fn update_with_native_build_closure() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(
            dir.path().join("confport.toml"),
            "[paths]\nconfigs-dir = \"configs\"\n",
        )
        .unwrap();
        let project = Project::discover(None, dir.path()).unwrap();
        assert!(project.configs_dir().starts_with(dir.path()));
        let tables = project.tables().unwrap();
        let objs = project.objs_dir();
        let native = |jobs: usize| -> confport_rewrite::Result<()> {
            assert_eq!(jobs, 3);
            fake_build_outputs(&objs);
            Ok(())
        };

        let report =
            commands::update::execute(&project, &tables, "linux", Some(3), false, &native).unwrap();
        assert_eq!(report.common.files, 7);
        assert_eq!(report.platform.files, 3);
        assert!(dir
            .path()
            .join("configs/linux/include/llvm/Config/llvm-config.h")
            .is_file());
    }

    #[test]
    fn cli_parses_update() {
        let cli = Cli::try_parse_from(["confport", "-vv", "update", "linux", "-j", "4"]).unwrap();
        assert_eq!(cli.verbose, 2);
        match cli.command {
            Commands::Update {
                platform,
                jobs,
                skip_build,
            } => {
                assert_eq!(platform, "linux");
                assert_eq!(jobs, Some(4));
                assert!(!skip_build);
            }
            _ => panic!("expected update"),
        }
    }

    #[test]
    fn cli_requires_platform_for_update() {
        assert!(Cli::try_parse_from(["confport", "update"]).is_err());
    }

    #[test]
    fn cli_global_manifest_after_subcommand() {
        let cli = Cli::try_parse_from([
            "confport",
            "platform",
            "describe",
            "android",
            "--format",
            "json",
            "--manifest",
            "conf/confport.toml",
        ])
        .unwrap();
        assert_eq!(cli.manifest.as_deref(), Some(Path::new("conf/confport.toml")));
        match cli.command {
            Commands::Platform {
                action: PlatformAction::Describe { name, format },
            } => {
                assert_eq!(name, "android");
                assert_eq!(format.as_deref(), Some("json"));
            }
            _ => panic!("expected platform describe"),
        }
    }
}
