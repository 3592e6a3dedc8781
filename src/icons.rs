use crate::model::{FALLBACK_ICON, ShortcutRecord};
use crate::{Error, Result};
use base64::Engine;
use base64::engine::general_purpose::STANDARD as BASE64;
use image::{ImageFormat, ImageReader};
use log::{debug, info};
use std::collections::HashMap;
use std::fs;
use std::io::Cursor;
use std::path::Path;
use std::sync::OnceLock;

pub const ICONS_PER_PAGE: usize = 48;

const BUNDLED_ICONS: &str = include_str!("../assets/lucide-icons.txt");

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct IconHandle(usize);

/// The bundled icon library: every name, in library order, plus a lookup table.
#[derive(Debug)]
pub struct IconCatalog {
    names: Vec<String>,
    index: HashMap<String, IconHandle>,
}

/// What a tile should draw.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResolvedIcon<'a> {
    Image { data: &'a str },
    Library { handle: IconHandle, name: &'a str, tint: &'a str },
    Fallback { name: &'static str, tint: &'a str },
}

impl IconCatalog {
    pub fn from_names<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut catalog = Self {
            names: Vec::new(),
            index: HashMap::new(),
        };
        for name in names {
            let name = name.into();
            if name.is_empty() || catalog.index.contains_key(&name) {
                continue;
            }
            catalog.index.insert(name.clone(), IconHandle(catalog.names.len()));
            catalog.names.push(name);
        }
        catalog
    }

    /// The library shipped with the binary, built on first use.
    pub fn bundled() -> &'static IconCatalog {
        static CATALOG: OnceLock<IconCatalog> = OnceLock::new();
        CATALOG.get_or_init(|| {
            let catalog = IconCatalog::from_names(
                BUNDLED_ICONS.lines().map(str::trim).filter(|l| !l.is_empty()),
            );
            info!("IconCatalog: {} bundled icons", catalog.len());
            catalog
        })
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn handle(&self, name: &str) -> Option<IconHandle> {
        self.index.get(name).copied()
    }

    pub fn name(&self, handle: IconHandle) -> &str {
        &self.names[handle.0]
    }

    pub fn resolve<'a>(&'a self, record: &'a ShortcutRecord) -> ResolvedIcon<'a> {
        if let Some(data) = record.custom_image() {
            return ResolvedIcon::Image { data };
        }
        let tint = record.icon_color.as_str();
        match self.index.get_key_value(record.icon()) {
            Some((name, &handle)) => ResolvedIcon::Library { handle, name: name.as_str(), tint },
            None => ResolvedIcon::Fallback { name: FALLBACK_ICON, tint },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IconPage<'a> {
    pub icons: Vec<&'a str>,
    pub page: usize,
    pub page_count: usize,
    pub total: usize,
}

/// Live search over a catalog, split into fixed-size pages.
#[derive(Debug, Clone)]
pub struct IconSearch {
    term: String,
    matches: Vec<IconHandle>,
    page: usize,
    page_size: usize,
}

impl IconSearch {
    pub fn new(catalog: &IconCatalog, page_size: usize) -> Self {
        let mut search = Self {
            term: String::new(),
            matches: Vec::new(),
            page: 0,
            page_size: page_size.max(1),
        };
        search.set_term(catalog, "");
        search
    }

    pub fn term(&self) -> &str {
        &self.term
    }

    pub fn page(&self) -> usize {
        self.page
    }

    pub fn match_count(&self) -> usize {
        self.matches.len()
    }

    pub fn page_count(&self) -> usize {
        self.matches.len().div_ceil(self.page_size)
    }

    /// Case-insensitive substring filter. Always returns to the first page.
    pub fn set_term(&mut self, catalog: &IconCatalog, term: &str) {
        let needle = term.to_lowercase();
        self.term = term.to_string();
        self.matches = catalog
            .names
            .iter()
            .enumerate()
            .filter(|(_, name)| name.to_lowercase().contains(&needle))
            .map(|(i, _)| IconHandle(i))
            .collect();
        self.page = 0;
        debug!("IconSearch: '{}' matched {} icons", term, self.matches.len());
    }

    pub fn go_to(&mut self, page: usize) {
        self.page = page.min(self.page_count().saturating_sub(1));
    }

    pub fn next_page(&mut self) {
        self.go_to(self.page + 1);
    }

    pub fn prev_page(&mut self) {
        self.go_to(self.page.saturating_sub(1));
    }

    pub fn current<'a>(&self, catalog: &'a IconCatalog) -> IconPage<'a> {
        let start = (self.page * self.page_size).min(self.matches.len());
        let end = (start + self.page_size).min(self.matches.len());
        IconPage {
            icons: self.matches[start..end].iter().map(|&h| catalog.name(h)).collect(),
            page: self.page,
            page_count: self.page_count(),
            total: self.matches.len(),
        }
    }
}

/// An uploaded image ready to be stored in a shortcut.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CustomIcon {
    pub file_name: String,
    pub data: String,
}

impl CustomIcon {
    /// Read an image file and embed it as a `data:` URL, downscaling anything
    /// larger than `max_size` pixels on either side.
    pub fn from_path(path: &Path, max_size: u32) -> Result<Self> {
        let bytes = fs::read(path).map_err(|e| {
            Error::io(format!("Failed to read {}", path.display()), Some(path.to_path_buf()), e)
        })?;
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        Self::from_bytes(file_name, bytes, max_size)
    }

    pub fn from_bytes(file_name: String, bytes: Vec<u8>, max_size: u32) -> Result<Self> {
        let not_an_image = || Error::NotAnImage(file_name.clone());
        let reader = ImageReader::new(Cursor::new(&bytes))
            .with_guessed_format()
            .map_err(|_| not_an_image())?;
        let format = reader.format().ok_or_else(not_an_image)?;
        let img = reader.decode().map_err(|_| not_an_image())?;

        let (payload, mime) = if img.width() > max_size || img.height() > max_size {
            let img = img.resize(max_size, max_size, image::imageops::FilterType::Lanczos3);
            let mut out = Cursor::new(Vec::new());
            img.write_to(&mut out, ImageFormat::Png).map_err(|_| not_an_image())?;
            debug!("CustomIcon: downscaled {} to {}x{}", file_name, img.width(), img.height());
            (out.into_inner(), ImageFormat::Png.to_mime_type())
        } else {
            (bytes, format.to_mime_type())
        };

        Ok(Self {
            data: format!("data:{};base64,{}", mime, BASE64.encode(payload)),
            file_name,
        })
    }
}
