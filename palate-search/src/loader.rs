//! Populates the vector index and metadata store at startup.
//!
//! The loader first tries the persisted snapshot and metadata files. Any
//! failure on that path (missing file, corrupt bytes, dimension problems,
//! invalid records) is absorbed: the service synthesizes a deterministic
//! placeholder catalog and still reaches Ready, in degraded mode. The only
//! fatal condition is the placeholder synthesis itself failing.

use palate_core::{CoreError, CoreResult, DishRecord, Embedding, FlatIndex, IndexSnapshot, MetadataStore};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::fs;
use std::path::Path;
use tracing::{info, warn};

/// Placeholder catalog size, matching the original deployment's fallback.
pub const PLACEHOLDER_VECTORS: usize = 300;
/// Placeholder embedding dimension.
pub const PLACEHOLDER_DIMENSION: usize = 100;
// Fixed seed so two processes falling back produce identical catalogs.
const PLACEHOLDER_SEED: u64 = 20_240_105;

/// Distinguishes a catalog loaded from real persisted data from the
/// synthesized fallback. Both are queryable; observability cares.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CatalogSource {
    Snapshot,
    Placeholder,
}

impl CatalogSource {
    pub fn as_str(&self) -> &'static str {
        match self {
            CatalogSource::Snapshot => "snapshot",
            CatalogSource::Placeholder => "placeholder",
        }
    }
}

/// The loaded, queryable catalog: index plus metadata, read-only.
#[derive(Debug)]
pub struct ReadyCatalog {
    pub index: FlatIndex,
    pub metadata: MetadataStore,
    pub source: CatalogSource,
}

/// Loads the catalog from the configured snapshot/metadata files, falling
/// back to the deterministic placeholder on any read or parse failure.
pub fn load_catalog(snapshot_path: &Path, metadata_path: &Path) -> CoreResult<ReadyCatalog> {
    match load_from_snapshot(snapshot_path, metadata_path) {
        Ok(catalog) => {
            info!(
                vectors = catalog.index.len(),
                dimensions = catalog.index.dimensions(),
                records = catalog.metadata.len(),
                "Loaded catalog from snapshot"
            );
            Ok(catalog)
        }
        Err(e) => {
            warn!(
                snapshot = ?snapshot_path,
                metadata = ?metadata_path,
                error = %e,
                "Failed to load persisted catalog; synthesizing placeholder"
            );
            let catalog = synthesize_placeholder()?;
            info!(
                vectors = catalog.index.len(),
                dimensions = catalog.index.dimensions(),
                "Placeholder catalog ready (degraded mode)"
            );
            Ok(catalog)
        }
    }
}

fn load_from_snapshot(snapshot_path: &Path, metadata_path: &Path) -> CoreResult<ReadyCatalog> {
    let snapshot_bytes = fs::read(snapshot_path).map_err(|e| CoreError::IoError {
        path: snapshot_path.to_path_buf(),
        source: e,
    })?;
    let snapshot: IndexSnapshot = bincode::deserialize(&snapshot_bytes)
        .map_err(|e| CoreError::Deserialization(format!("index snapshot: {}", e)))?;

    let metadata_bytes = fs::read(metadata_path).map_err(|e| CoreError::IoError {
        path: metadata_path.to_path_buf(),
        source: e,
    })?;
    let records: Vec<DishRecord> = serde_json::from_slice(&metadata_bytes)
        .map_err(|e| CoreError::Deserialization(format!("metadata file: {}", e)))?;
    for record in &records {
        record.validate()?;
    }

    let indexed_ids: Vec<u64> = snapshot.entries.iter().map(|(id, _)| *id).collect();
    let metadata = MetadataStore::from_records(records);

    // Ids without metadata stay in the index and are dropped per-query.
    let orphaned = indexed_ids
        .iter()
        .filter(|id| !metadata.contains(**id))
        .count();
    if orphaned > 0 {
        warn!(orphaned, "Snapshot contains ids with no metadata; they will be dropped from results");
    }

    let index = FlatIndex::from_snapshot(snapshot)?;
    Ok(ReadyCatalog {
        index,
        metadata,
        source: CatalogSource::Snapshot,
    })
}

/// Builds the fixed-size, fixed-seed placeholder catalog.
pub fn synthesize_placeholder() -> CoreResult<ReadyCatalog> {
    let mut rng = StdRng::seed_from_u64(PLACEHOLDER_SEED);

    let mut entries: Vec<(u64, Embedding)> = Vec::with_capacity(PLACEHOLDER_VECTORS);
    let mut records: Vec<DishRecord> = Vec::with_capacity(PLACEHOLDER_VECTORS);
    for i in 0..PLACEHOLDER_VECTORS {
        let vector: Vec<f32> = (0..PLACEHOLDER_DIMENSION).map(|_| rng.gen::<f32>()).collect();
        entries.push((i as u64, vector.into()));
        records.push(DishRecord {
            id: i as u64,
            name: format!("candidate_{}", i),
            spicy_level: (i % 5) as u8,
            main_ingredients: format!("ingredient_{}", i),
            image_url: format!("url_{}", i),
        });
    }

    let index = FlatIndex::build_with_dimension(PLACEHOLDER_DIMENSION, entries)?;
    Ok(ReadyCatalog {
        index,
        metadata: MetadataStore::from_records(records),
        source: CatalogSource::Placeholder,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_valid_files(dir: &tempfile::TempDir) -> (std::path::PathBuf, std::path::PathBuf) {
        let snapshot = IndexSnapshot {
            dimension: 2,
            entries: vec![(1, vec![0.0, 0.0]), (2, vec![1.0, 1.0]), (3, vec![5.0, 5.0])],
        };
        let snapshot_path = dir.path().join("index.bin");
        fs::write(&snapshot_path, bincode::serialize(&snapshot).unwrap()).unwrap();

        let records = vec![
            DishRecord {
                id: 1,
                name: "cream tteokbokki".into(),
                spicy_level: 1,
                main_ingredients: "rice cake, cream sauce".into(),
                image_url: "url_1".into(),
            },
            DishRecord {
                id: 2,
                name: "kimchi jeon".into(),
                spicy_level: 3,
                main_ingredients: "kimchi, flour".into(),
                image_url: "url_2".into(),
            },
            DishRecord {
                id: 3,
                name: "bulgogi".into(),
                spicy_level: 0,
                main_ingredients: "beef, soy sauce".into(),
                image_url: "url_3".into(),
            },
        ];
        let metadata_path = dir.path().join("metadata.json");
        fs::write(&metadata_path, serde_json::to_vec(&records).unwrap()).unwrap();

        (snapshot_path, metadata_path)
    }

    #[test]
    fn test_loads_valid_snapshot() {
        let dir = tempfile::tempdir().unwrap();
        let (snapshot_path, metadata_path) = write_valid_files(&dir);

        let catalog = load_catalog(&snapshot_path, &metadata_path).unwrap();
        assert_eq!(catalog.source, CatalogSource::Snapshot);
        assert_eq!(catalog.index.len(), 3);
        assert_eq!(catalog.index.dimensions(), 2);
        assert_eq!(catalog.metadata.get(2).unwrap().name, "kimchi jeon");
    }

    #[test]
    fn test_missing_files_fall_back_to_placeholder() {
        let dir = tempfile::tempdir().unwrap();
        let catalog = load_catalog(
            &dir.path().join("nope.bin"),
            &dir.path().join("nope.json"),
        )
        .unwrap();
        assert_eq!(catalog.source, CatalogSource::Placeholder);
        assert_eq!(catalog.index.len(), PLACEHOLDER_VECTORS);
        assert_eq!(catalog.index.dimensions(), PLACEHOLDER_DIMENSION);
        assert_eq!(catalog.metadata.len(), PLACEHOLDER_VECTORS);
    }

    #[test]
    fn test_corrupt_snapshot_falls_back_and_stays_queryable() {
        let dir = tempfile::tempdir().unwrap();
        let (_, metadata_path) = write_valid_files(&dir);
        let snapshot_path = dir.path().join("corrupt.bin");
        let mut f = fs::File::create(&snapshot_path).unwrap();
        f.write_all(b"not a snapshot at all").unwrap();

        let catalog = load_catalog(&snapshot_path, &metadata_path).unwrap();
        assert_eq!(catalog.source, CatalogSource::Placeholder);

        let query: palate_core::Embedding = vec![0.5; PLACEHOLDER_DIMENSION].into();
        let results = catalog.index.query(&query, 5).unwrap();
        assert_eq!(results.len(), 5);
    }

    #[test]
    fn test_placeholder_is_deterministic() {
        let first = synthesize_placeholder().unwrap();
        let second = synthesize_placeholder().unwrap();

        let query: palate_core::Embedding = vec![0.25; PLACEHOLDER_DIMENSION].into();
        let a = first.index.query(&query, 10).unwrap();
        let b = second.index.query(&query, 10).unwrap();
        assert_eq!(a, b);
        assert_eq!(first.metadata.get(7).unwrap().spicy_level, 2);
    }

    #[test]
    fn test_invalid_metadata_record_falls_back() {
        let dir = tempfile::tempdir().unwrap();
        let (snapshot_path, _) = write_valid_files(&dir);
        let metadata_path = dir.path().join("bad_metadata.json");
        // spicy_level out of range
        fs::write(
            &metadata_path,
            br#"[{"id":1,"name":"x","spicy_level":9,"main_ingredients":"y","image_url":"z"}]"#,
        )
        .unwrap();

        let catalog = load_catalog(&snapshot_path, &metadata_path).unwrap();
        assert_eq!(catalog.source, CatalogSource::Placeholder);
    }
}
