use std::{
    collections::{BTreeMap, HashMap},
    fs::{self, OpenOptions},
    io::Write,
    path::{Path, PathBuf},
    sync::{Arc, Mutex, PoisonError},
};

use log::{debug, info};

use crate::error::{Error, Result};

pub const IS_LOGGED_IN: &str = "isLoggedIn";

const UBIO_DATA_DIR: &str = "ubio";
const PREFS_FILE_NAME: &str = "prefs.json";

/// Durable key/value booleans.
///
/// Missing keys read as `false`. Implementations serialize writes against
/// reads internally, callers share a store by reference or through an `Arc`.
pub trait LoginStore {
    fn get_bool<K>(&self, key: K) -> bool
    where
        K: AsRef<str>;

    fn set_bool<K>(&self, key: K, value: bool) -> Result<()>
    where
        K: Into<String>;
}

impl<T> LoginStore for Arc<T>
where
    T: LoginStore,
{
    fn get_bool<K>(&self, key: K) -> bool
    where
        K: AsRef<str>,
    {
        self.as_ref().get_bool(key)
    }

    fn set_bool<K>(&self, key: K, value: bool) -> Result<()>
    where
        K: Into<String>,
    {
        self.as_ref().set_bool(key, value)
    }
}

////////////////////////////////////////////////////////////////////////////////
// MEMORY
////////////////////////////////////////////////////////////////////////////////

#[derive(Debug, Default)]
pub struct MemoryStore {
    memory: Mutex<HashMap<String, bool>>,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl LoginStore for MemoryStore {
    fn get_bool<K>(&self, key: K) -> bool
    where
        K: AsRef<str>,
    {
        let memory = self.memory.lock().unwrap_or_else(PoisonError::into_inner);
        memory.get(key.as_ref()).copied().unwrap_or(false)
    }

    fn set_bool<K>(&self, key: K, value: bool) -> Result<()>
    where
        K: Into<String>,
    {
        let mut memory = self.memory.lock().unwrap_or_else(PoisonError::into_inner);
        memory.insert(key.into(), value);
        Ok(())
    }
}

////////////////////////////////////////////////////////////////////////////////
// FILE
////////////////////////////////////////////////////////////////////////////////

/// Preferences persisted as a JSON object of booleans.
#[derive(Debug)]
pub struct FileStore {
    file_path: PathBuf,
    values: Mutex<BTreeMap<String, bool>>,
}

impl FileStore {
    /// Open the default preferences file under the user's data dir.
    pub fn new() -> Result<Self> {
        let data_dir = dirs::data_dir().ok_or(Error::DataDirNotFound)?;

        Self::open(data_dir.join(UBIO_DATA_DIR).join(PREFS_FILE_NAME))
    }

    pub fn open<P>(file_path: P) -> Result<Self>
    where
        P: AsRef<Path>,
    {
        let file_path = file_path.as_ref().to_path_buf();

        if let Some(parent) = file_path.parent()
            && !parent.as_os_str().is_empty()
            && !parent.exists()
        {
            fs::create_dir_all(parent)?;
        }

        let values = if file_path.exists() {
            info!("{} exists", file_path.display());
            let data = fs::read_to_string(&file_path)?;
            serde_json::from_str(&data)?
        } else {
            BTreeMap::new()
        };

        info!("preferences file: {}", file_path.display());

        Ok(Self {
            file_path,
            values: Mutex::new(values),
        })
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.file_path
    }

    fn sync(&self, values: &BTreeMap<String, bool>) -> Result<()> {
        let data = serde_json::to_string_pretty(values)?;

        let mut options = OpenOptions::new();
        options.create(true).write(true).truncate(true);

        #[cfg(unix)]
        {
            use std::os::unix::fs::OpenOptionsExt;
            options.mode(0o600);
        }

        let mut f = options.open(&self.file_path)?;
        f.write_all(data.as_bytes())?;
        f.sync_all()?;

        debug!("synced {}", self.file_path.display());

        Ok(())
    }
}

impl LoginStore for FileStore {
    fn get_bool<K>(&self, key: K) -> bool
    where
        K: AsRef<str>,
    {
        let values = self.values.lock().unwrap_or_else(PoisonError::into_inner);
        values.get(key.as_ref()).copied().unwrap_or(false)
    }

    fn set_bool<K>(&self, key: K, value: bool) -> Result<()>
    where
        K: Into<String>,
    {
        let mut values = self.values.lock().unwrap_or_else(PoisonError::into_inner);

        let key = key.into();
        let previous = values.insert(key.clone(), value);

        //
        // keep memory and disk in step when the write fails
        //
        if let Err(e) = self.sync(&values) {
            match previous {
                Some(v) => values.insert(key, v),
                None => values.remove(&key),
            };
            return Err(e);
        }

        Ok(())
    }
}
