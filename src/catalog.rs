/// Wildcard category accepted by [`filter_common_apps`].
pub const ALL_CATEGORIES: &str = "All";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CommonApp {
    pub name: &'static str,
    pub command: &'static str,
    pub category: &'static str,
}

const fn app(name: &'static str, command: &'static str, category: &'static str) -> CommonApp {
    CommonApp { name, command, category }
}

pub const COMMON_APPS: &[CommonApp] = &[
    app("Text Editor", "code", "Development"),
    app("Terminal", "gnome-terminal", "Development"),
    app("File Manager", "nautilus", "System"),
    app("Web Browser", "firefox", "Internet"),
    app("Chrome", "google-chrome", "Internet"),
    app("VSCode", "code", "Development"),
    app("Sublime Text", "subl", "Development"),
    app("Vim", "vim", "Development"),
    app("Emacs", "emacs", "Development"),
    app("Calculator", "gnome-calculator", "Utilities"),
    app("Screenshot", "gnome-screenshot", "Utilities"),
    app("Settings", "gnome-control-center", "System"),
    app("Music Player", "rhythmbox", "Media"),
    app("Video Player", "vlc", "Media"),
    app("Image Viewer", "eog", "Media"),
    app("GIMP", "gimp", "Graphics"),
    app("Inkscape", "inkscape", "Graphics"),
    app("LibreOffice Writer", "libreoffice --writer", "Office"),
    app("LibreOffice Calc", "libreoffice --calc", "Office"),
    app("Discord", "discord", "Communication"),
    app("Slack", "slack", "Communication"),
    app("Zoom", "zoom", "Communication"),
];

/// "All" followed by each category in first-seen order.
pub fn categories() -> Vec<&'static str> {
    let mut out = vec![ALL_CATEGORIES];
    for entry in COMMON_APPS {
        if !out.contains(&entry.category) {
            out.push(entry.category);
        }
    }
    out
}

pub fn filter_common_apps(search: &str, category: &str) -> Vec<&'static CommonApp> {
    let needle = search.to_lowercase();
    COMMON_APPS
        .iter()
        .filter(|entry| {
            entry.name.to_lowercase().contains(&needle)
                || entry.command.to_lowercase().contains(&needle)
        })
        .filter(|entry| category == ALL_CATEGORIES || entry.category == category)
        .collect()
}
