//! Texture manifest parsing and the batch texture load barrier.

use std::{
    collections::HashMap,
    fs,
    path::{Path, PathBuf},
};

use serde::Deserialize;

use crate::RenderingError;

const SUPPORTED_MANIFEST_VERSION: u32 = 1;

/// Textures every scene may reference.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TextureKey {
    /// Hero ship, also used for escorts.
    Hero,
    /// Enemy ship, also used for the boss.
    Enemy,
    /// Life icon shown in the HUD.
    Life,
    /// Shield pickup.
    Shield,
    /// Falling meteor.
    Meteor,
    /// Laser fired by the red weapon.
    LaserRed,
    /// Laser fired by the blue weapon.
    LaserBlue,
    /// Laser fired by the green weapon.
    LaserGreen,
    /// Laser fired by the boss.
    BossLaser,
}

impl TextureKey {
    /// Every key in canonical load order.
    pub const ALL: [Self; 9] = [
        Self::Hero,
        Self::Enemy,
        Self::Life,
        Self::Shield,
        Self::Meteor,
        Self::LaserRed,
        Self::LaserBlue,
        Self::LaserGreen,
        Self::BossLaser,
    ];

    /// Name used for the key in the manifest.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Hero => "Hero",
            Self::Enemy => "Enemy",
            Self::Life => "Life",
            Self::Shield => "Shield",
            Self::Meteor => "Meteor",
            Self::LaserRed => "LaserRed",
            Self::LaserBlue => "LaserBlue",
            Self::LaserGreen => "LaserGreen",
            Self::BossLaser => "BossLaser",
        }
    }

    fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|key| key.name() == name)
    }
}

/// Loads a single texture file into a backend-specific handle.
pub trait TextureProvider {
    /// Handle produced by the provider.
    type Texture;

    /// Loads the texture stored at `path`, failing if it cannot be decoded.
    fn load(&mut self, key: TextureKey, path: &Path) -> anyhow::Result<Self::Texture>;
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawManifest {
    version: u32,
    textures: HashMap<String, String>,
}

/// Parsed texture manifest with paths resolved against its directory.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TextureManifest {
    entries: Vec<(TextureKey, PathBuf)>,
}

impl TextureManifest {
    /// Reads and parses the manifest at `path`.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, RenderingError> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path).map_err(|source| RenderingError::ManifestRead {
            path: path.to_path_buf(),
            source,
        })?;
        let base = path
            .parent()
            .map_or_else(|| PathBuf::from("."), Path::to_path_buf);
        Self::parse(&contents, &base)
    }

    /// Parses manifest contents, resolving paths relative to `base`.
    ///
    /// Every [`TextureKey`] must appear exactly once; unknown keys and other
    /// manifest versions are rejected.
    pub fn parse(contents: &str, base: &Path) -> Result<Self, RenderingError> {
        let manifest: RawManifest = toml::from_str(contents)?;
        if manifest.version != SUPPORTED_MANIFEST_VERSION {
            return Err(RenderingError::UnsupportedVersion {
                found: manifest.version,
                expected: SUPPORTED_MANIFEST_VERSION,
            });
        }

        let mut resolved = HashMap::with_capacity(manifest.textures.len());
        for (name, relative) in manifest.textures {
            let Some(key) = TextureKey::from_name(&name) else {
                return Err(RenderingError::UnknownTexture { name });
            };
            let _ = resolved.insert(key, base.join(relative));
        }

        let mut entries = Vec::with_capacity(TextureKey::ALL.len());
        for key in TextureKey::ALL {
            let Some(path) = resolved.remove(&key) else {
                return Err(RenderingError::MissingTexture { key });
            };
            entries.push((key, path));
        }

        Ok(Self { entries })
    }

    /// Entries in canonical load order.
    #[must_use]
    pub fn entries(&self) -> &[(TextureKey, PathBuf)] {
        &self.entries
    }
}

/// Every texture a scene needs, loaded as one batch.
#[derive(Debug)]
pub struct TextureSet<T> {
    textures: HashMap<TextureKey, T>,
}

impl<T> Default for TextureSet<T> {
    fn default() -> Self {
        Self {
            textures: HashMap::new(),
        }
    }
}

impl<T> TextureSet<T> {
    /// Loads every texture of the manifest in canonical order.
    ///
    /// The first failure aborts the whole batch, so a returned set is always
    /// complete.
    pub fn load<P>(manifest: &TextureManifest, provider: &mut P) -> Result<Self, RenderingError>
    where
        P: TextureProvider<Texture = T>,
    {
        let mut textures = HashMap::with_capacity(manifest.entries.len());
        for (key, path) in &manifest.entries {
            let texture =
                provider
                    .load(*key, path)
                    .map_err(|error| RenderingError::TextureLoad {
                        key: *key,
                        path: path.clone(),
                        reason: format!("{error:#}"),
                    })?;
            let _ = textures.insert(*key, texture);
        }
        Ok(Self { textures })
    }

    /// Reads the manifest at `path` and loads all of its textures.
    pub fn from_manifest_path<P>(
        path: impl AsRef<Path>,
        provider: &mut P,
    ) -> Result<Self, RenderingError>
    where
        P: TextureProvider<Texture = T>,
    {
        let manifest = TextureManifest::load(path)?;
        Self::load(&manifest, provider)
    }

    /// Texture registered for `key`.
    #[must_use]
    pub fn get(&self, key: TextureKey) -> Option<&T> {
        self.textures.get(&key)
    }

    /// Texture registered for `key`, or an error naming the missing texture.
    pub fn require(&self, key: TextureKey) -> Result<&T, RenderingError> {
        self.get(key)
            .ok_or(RenderingError::TextureUnavailable { key })
    }

    /// Number of loaded textures.
    #[must_use]
    pub fn len(&self) -> usize {
        self.textures.len()
    }

    /// Reports whether no texture is loaded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.textures.is_empty()
    }
}
