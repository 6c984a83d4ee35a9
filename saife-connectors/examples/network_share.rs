//! Network Share Example
//!
//! Walks through a client session against a network share:
//!
//! 1. Unlock the library with the default password
//! 2. Check the SAIFE service is reachable
//! 3. Upload `myFile` (if present) through a [`RemoteOutputStream`]
//! 4. Download it again into `myFileDown` through a [`FileOutputStream`]
//!
//! The share is an in-memory [`MemoryConnector`] that drops the first
//! upload, so the retry policy has something to do.
//!
//! ## Running the Example
//!
//! ```bash
//! echo "hello share" > myFile
//! cargo run -p saife-connectors --example network_share
//! ```

use std::path::Path;

use saife_connectors::{
    ensure_available, AttemptLimiter, ClientConfig, MemoryConnector, RemoteOutputStream,
};
use saife_core::{FileOutputStream, LibraryError, LibraryResult, OutputStream};

const DEFAULT_PASSWORD: &str = "mysecret";
const FILE_NAME_UP: &str = "myFile";
const FILE_NAME_DOWN: &str = "myFileDown";

fn upload(config: &ClientConfig, share: &mut MemoryConnector, path: &Path) -> LibraryResult<()> {
    let data = std::fs::read(path)
        .map_err(|e| LibraryError::new(format!("cannot read {}: {}", path.display(), e)))?;

    config.retry.run(|| {
        let mut stream = RemoteOutputStream::new(&mut *share, FILE_NAME_UP);
        stream.write_all(&data)?;
        stream.flush()?;
        stream.close()?;
        Ok(())
    })?;

    println!("Uploaded {} ({} bytes)", FILE_NAME_UP, data.len());
    Ok(())
}

fn download(config: &ClientConfig, share: &MemoryConnector, name: &str) -> LibraryResult<()> {
    let data = share
        .object(name)
        .ok_or_else(|| LibraryError::new(format!("{} is not on the share", name)))?;

    let mut file = FileOutputStream::open(FILE_NAME_DOWN, &config.stream)?;
    file.write_all(data)?;
    file.close()?;

    println!("Downloaded {} into {}", name, FILE_NAME_DOWN);
    Ok(())
}

fn main() -> Result<(), LibraryError> {
    let config = ClientConfig::default();

    // Unlock
    let mut gate = AttemptLimiter::new(
        |password: &str| Ok(password == DEFAULT_PASSWORD),
        config.max_unlock_attempts,
    );
    match gate.unlock(DEFAULT_PASSWORD) {
        Ok(()) => println!("Library unlocked"),
        Err(e) if e.is_admin_locked() => {
            println!("Library is admin locked, ask an administrator to reset the password");
            return Err(e);
        }
        Err(e) => return Err(e),
    }

    let mut share = MemoryConnector::new();
    share.fail_next_sends(1);

    ensure_available(&share)?;
    println!("Initializing NetworkShare");

    let path = Path::new(FILE_NAME_UP);
    if path.exists() {
        upload(&config, &mut share, path)?;
        download(&config, &share, FILE_NAME_UP)?;
    } else {
        println!("{} was not found", FILE_NAME_UP);
    }

    println!("Goodbye");
    Ok(())
}
