use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use fidgetapps::backend::FileBackend;
use fidgetapps::catalog::{self, ALL_CATEGORIES};
use fidgetapps::config::{Config, load_config};
use fidgetapps::editor::ShortcutEditor;
use fidgetapps::executor::ShellLauncher;
use fidgetapps::icons::{IconCatalog, ResolvedIcon};
use fidgetapps::launchpad::{Activation, Launchpad};
use fidgetapps::matcher::FuzzyMatcher;
use fidgetapps::model::ShortcutId;
use fidgetapps::palette::ColorValue;
use fidgetapps::sources::desktop::DesktopSource;
use fidgetapps::store::{ConfigStore, DeleteOutcome};
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::time::Duration;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Shortcut list to use instead of the configured one
    #[arg(short, long)]
    file: Option<PathBuf>,

    #[command(subcommand)]
    command: Cmd,
}

#[derive(clap::Args, Debug, Default)]
struct Fields {
    #[arg(long)]
    name: Option<String>,
    #[arg(long)]
    command: Option<String>,
    /// Library icon name
    #[arg(long, conflicts_with = "upload")]
    icon: Option<String>,
    /// Image file to embed as the icon
    #[arg(long)]
    upload: Option<PathBuf>,
    /// Palette token (bg-blue-500) or literal (#336699, hsl(...))
    #[arg(long)]
    color: Option<String>,
    #[arg(long)]
    icon_color: Option<String>,
}

#[derive(Subcommand, Debug)]
enum Cmd {
    /// Show every shortcut
    List,
    /// Run a shortcut by id or by (fuzzy) name
    Launch { target: String },
    /// Create a shortcut
    Add(Fields),
    /// Change fields of an existing shortcut
    Edit {
        id: ShortcutId,
        #[command(flatten)]
        fields: Fields,
    },
    /// Remove a shortcut
    Delete {
        id: ShortcutId,
        /// Do not ask for confirmation
        #[arg(short, long)]
        yes: bool,
    },
    /// Search the icon library
    Icons {
        #[arg(short, long, default_value = "")]
        search: String,
        /// 1-based page number
        #[arg(short, long, default_value_t = 1)]
        page: usize,
    },
    /// Browse the list of common applications
    Apps {
        #[arg(short, long, default_value = "")]
        search: String,
        #[arg(short, long, default_value = ALL_CATEGORIES)]
        category: String,
    },
    /// Browse applications installed on this machine
    Installed {
        #[arg(short, long, default_value = "")]
        search: String,
    },
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();
    let config = load_config().context("loading settings")?;

    let path = args.file.clone().unwrap_or_else(|| config.general.shortcuts_path());
    let mut store = ConfigStore::new(FileBackend::new(path));
    store.on_refresh(|records| log::debug!("reloading launcher with {} shortcuts", records.len()));
    store.load().context("loading shortcuts")?;

    let library = IconCatalog::bundled();
    let source = DesktopSource::new(config.sources.application_dirs.clone());
    let mut editor = ShortcutEditor::new(library, source, config.editor.clone());

    match args.command {
        Cmd::List => {
            for record in store.records() {
                let icon = match library.resolve(record) {
                    ResolvedIcon::Image { .. } => format!("image:{}", record.icon()),
                    ResolvedIcon::Library { name, tint, .. } => format!("{} {}", name, tint),
                    ResolvedIcon::Fallback { name, tint } => format!("{}? {}", name, tint),
                };
                println!("{:>4}  {:<24} {:<32} {:<20} {}", record.id, record.name, record.command, record.color, icon);
            }
        }
        Cmd::Launch { target } => launch(&config, &store, &target)?,
        Cmd::Add(fields) => {
            editor.begin_create(&store);
            apply(&mut editor, &mut store, fields)?;
            let id = editor.save(&mut store)?;
            println!("Added shortcut {}", id);
        }
        Cmd::Edit { id, fields } => {
            if editor.begin_edit(&store, id).is_none() {
                bail!("no shortcut with id {}", id);
            }
            apply(&mut editor, &mut store, fields)?;
            editor.save(&mut store)?;
        }
        Cmd::Delete { id, yes } => {
            let outcome = editor.delete(&mut store, id, |record| yes || confirm(&record.name))?;
            match outcome {
                DeleteOutcome::Deleted => println!("Deleted shortcut {}", id),
                DeleteOutcome::Refused => bail!("the settings shortcut cannot be deleted"),
                DeleteOutcome::Declined => println!("Kept shortcut {}", id),
                DeleteOutcome::NotFound => bail!("no shortcut with id {}", id),
            }
        }
        Cmd::Icons { search, page } => {
            editor.set_icon_search(&search);
            editor.go_to_icon_page(page.saturating_sub(1));
            let page = editor.icon_page();
            for name in &page.icons {
                println!("{}", name);
            }
            println!("-- page {}/{} ({} icons)", page.page + 1, page.page_count.max(1), page.total);
        }
        Cmd::Apps { search, category } => {
            editor.set_app_search(&search);
            editor.set_app_category(&category);
            for app in editor.common_apps() {
                println!("{:<20} {:<24} {}", app.category, app.name, app.command);
            }
            if !catalog::categories().contains(&category.as_str()) {
                eprintln!("unknown category '{}'", category);
            }
        }
        Cmd::Installed { search } => {
            editor.open_installed_apps();
            editor.set_installed_search(&search);
            for app in editor.installed_apps() {
                println!("{:<40} {}", app.name, app.exec);
            }
        }
    }

    Ok(())
}

fn apply(
    editor: &mut ShortcutEditor<'_, DesktopSource>,
    store: &mut ConfigStore<FileBackend>,
    fields: Fields,
) -> Result<()> {
    if let Some(name) = fields.name {
        editor.set_name(store, &name)?;
    }
    if let Some(command) = fields.command {
        editor.set_command(store, &command)?;
    }
    if let Some(icon) = fields.icon {
        if editor.catalog().handle(&icon).is_none() {
            log::warn!("'{}' is not in the icon library, the fallback glyph will be shown", icon);
        }
        editor.select_library_icon(store, &icon)?;
    }
    if let Some(path) = fields.upload {
        editor
            .upload_custom_icon(store, &path)
            .with_context(|| format!("using {} as icon", path.display()))?;
    }
    if let Some(color) = fields.color {
        editor.set_color(store, ColorValue::parse(&color))?;
    }
    if let Some(tint) = fields.icon_color {
        editor.set_icon_color(store, &tint)?;
    }
    Ok(())
}

fn launch(config: &Config, store: &ConfigStore<FileBackend>, target: &str) -> Result<()> {
    let id = match target.parse::<ShortcutId>() {
        Ok(id) => id,
        Err(_) => match FuzzyMatcher::new().best_match(target, store.records()) {
            Some(record) => record.id,
            None => bail!("no shortcut matches '{}'", target),
        },
    };

    let launcher = ShellLauncher::new(config.general.shell.clone());
    let mut pad = Launchpad::new(launcher, Duration::from_millis(config.general.launch_cooldown_ms));
    match pad.activate(store.records(), id)? {
        Activation::Launched => {}
        Activation::OpenSettings => println!("Use `fidgetapps edit` to change shortcuts"),
        Activation::CoolingDown => println!("Still opening the previous shortcut"),
        Activation::NotFound => bail!("no shortcut with id {}", id),
    }
    Ok(())
}

fn confirm(name: &str) -> bool {
    print!("Are you sure you want to delete '{}'? [y/N] ", name);
    let _ = io::stdout().flush();
    let mut answer = String::new();
    if io::stdin().lock().read_line(&mut answer).is_err() {
        return false;
    }
    matches!(answer.trim(), "y" | "Y" | "yes")
}
