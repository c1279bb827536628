pub mod artifact;

pub use artifact::{NewArtifact, StoredArtifact};
