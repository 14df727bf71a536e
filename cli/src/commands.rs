//! Subcommands and the snapshot files they operate on.

use anyhow::Context;
use std::fmt::Write as _;
use std::path::PathBuf;

use ppml_registry::{
    AuthenticatedCaller, ConfirmationRegistry, Deployment, Flavor, FlavorKind, MapOutcome,
    RegistryEvent, VerifyOutcome,
};
use ppml_store::{MemoryStore, RegistrySnapshot};
use ppml_types::{ConfirmationState, ContentHash, Identity};

use crate::config::CliConfig;

#[derive(clap::Subcommand)]
pub enum Command {
    /// Print the content hash of a payload, as owners and providers compute it.
    Hash {
        #[command(flatten)]
        input: HashInput,
    },
    /// Assert that a provider should hold the given content (run as the owner).
    Map {
        /// Registry to use: "data" or "model".
        #[arg(long)]
        flavor: FlavorKind,
        /// Authenticated identity of the owner making the claim.
        #[arg(long)]
        caller: Identity,
        /// Provider expected to hold the content.
        #[arg(long)]
        provider: Identity,
        #[command(flatten)]
        input: HashInput,
    },
    /// Prove possession of received content (run as the provider).
    Verify {
        #[arg(long)]
        flavor: FlavorKind,
        /// Authenticated identity of the provider.
        #[arg(long)]
        caller: Identity,
        #[command(flatten)]
        input: HashInput,
    },
    /// List a provider's confirmations in insertion order.
    List {
        #[arg(long)]
        flavor: FlavorKind,
        #[arg(long)]
        provider: Identity,
    },
    /// List providers that hold at least one confirmation.
    Providers {
        #[arg(long)]
        flavor: FlavorKind,
    },
}

/// Exactly one way of naming the content: a hash, an inline payload, or a payload file.
#[derive(clap::Args)]
#[group(required = true, multiple = false)]
pub struct HashInput {
    /// Precomputed content hash (64 hex digits, optional 0x prefix).
    #[arg(long)]
    hash: Option<ContentHash>,
    /// Inline payload to hash.
    #[arg(long)]
    payload: Option<String>,
    /// File whose bytes are the payload to hash.
    #[arg(long)]
    payload_file: Option<PathBuf>,
}

impl HashInput {
    pub fn resolve(&self) -> anyhow::Result<ContentHash> {
        if let Some(hash) = self.hash {
            return Ok(hash);
        }
        if let Some(payload) = &self.payload {
            return Ok(ppml_crypto::hash_payload(payload.as_bytes()));
        }
        if let Some(path) = &self.payload_file {
            let bytes = std::fs::read(path)
                .with_context(|| format!("reading payload file {}", path.display()))?;
            return Ok(ppml_crypto::hash_payload(&bytes));
        }
        anyhow::bail!("one of --hash, --payload or --payload-file is required")
    }
}

/// What a command printed and whether registry state needs saving.
#[derive(Debug, PartialEq, Eq)]
pub struct Outcome {
    pub text: String,
    pub mutated: bool,
}

impl Outcome {
    fn read_only(text: String) -> Self {
        Self {
            text,
            mutated: false,
        }
    }

    fn mutated(text: String) -> Self {
        Self {
            text,
            mutated: true,
        }
    }
}

pub fn execute(command: Command, deployment: &mut Deployment) -> anyhow::Result<Outcome> {
    match command {
        Command::Hash { input } => Ok(Outcome::read_only(input.resolve()?.to_string())),
        Command::Map {
            flavor,
            caller,
            provider,
            input,
        } => {
            let hash = input.resolve()?;
            let caller = AuthenticatedCaller::new(caller);
            let text = match flavor {
                FlavorKind::Data => map(&mut deployment.data, &caller, hash, &provider)?,
                FlavorKind::Model => map(&mut deployment.model, &caller, hash, &provider)?,
            };
            Ok(Outcome::mutated(text))
        }
        Command::Verify {
            flavor,
            caller,
            input,
        } => {
            let hash = input.resolve()?;
            let caller = AuthenticatedCaller::new(caller);
            let outcome = match flavor {
                FlavorKind::Data => deployment.data.verify_hash(&caller, hash)?,
                FlavorKind::Model => deployment.model.verify_hash(&caller, hash)?,
            };
            Ok(match outcome {
                VerifyOutcome::Verified { claimant, index } => Outcome::mutated(format!(
                    "verified confirmation #{index} from {claimant}"
                )),
                VerifyOutcome::NoMatch => {
                    Outcome::read_only(format!("no pending confirmation matches {hash}"))
                }
            })
        }
        Command::List { flavor, provider } => {
            let text = match flavor {
                FlavorKind::Data => list(&deployment.data, &provider)?,
                FlavorKind::Model => list(&deployment.model, &provider)?,
            };
            Ok(Outcome::read_only(text))
        }
        Command::Providers { flavor } => {
            let providers = match flavor {
                FlavorKind::Data => deployment.data.providers()?,
                FlavorKind::Model => deployment.model.providers()?,
            };
            let names: Vec<&str> = providers.iter().map(Identity::as_str).collect();
            Ok(Outcome::read_only(names.join("\n")))
        }
    }
}

fn map<F: Flavor>(
    registry: &mut ConfirmationRegistry<F>,
    caller: &AuthenticatedCaller,
    hash: ContentHash,
    provider: &Identity,
) -> anyhow::Result<String> {
    Ok(match registry.map_claimant_to_hash(caller, hash, provider)? {
        MapOutcome::Created { index } => {
            format!("created {} confirmation #{index} for {provider}: {hash}", F::KIND)
        }
        MapOutcome::Updated {
            index, previous, ..
        } => format!(
            "updated {} confirmation #{index} for {provider}: {previous} -> {hash}",
            F::KIND
        ),
    })
}

fn list<F: Flavor>(
    registry: &ConfirmationRegistry<F>,
    provider: &Identity,
) -> anyhow::Result<String> {
    let mut out = String::new();
    for (index, confirmation) in registry.get_confirmations(provider)?.iter().enumerate() {
        let state = match confirmation.state() {
            ConfirmationState::Pending => "pending",
            ConfirmationState::Verified => "verified",
        };
        writeln!(
            out,
            "{index}\t{}\t{}\t{state}",
            confirmation.claimant, confirmation.hash
        )?;
    }
    Ok(out.trim_end().to_string())
}

/// The pair of snapshot files backing a deployment between runs.
pub struct StateFiles {
    dir: PathBuf,
    data: PathBuf,
    model: PathBuf,
}

impl StateFiles {
    pub fn from_config(config: &CliConfig) -> Self {
        Self {
            dir: config.state_dir.clone(),
            data: config.data_snapshot_path(),
            model: config.model_snapshot_path(),
        }
    }

    /// Rebuild both registries from their snapshots; missing files start empty.
    pub fn load(&self, config: &CliConfig) -> anyhow::Result<Deployment> {
        let data = MemoryStore::from_snapshot(RegistrySnapshot::read_from(&self.data)?)?;
        let model = MemoryStore::from_snapshot(RegistrySnapshot::read_from(&self.model)?)?;
        let mut deployment =
            Deployment::with_stores(data, config.data.clone(), model, config.model.clone());
        deployment.data.subscribe(Box::new(log_event));
        deployment.model.subscribe(Box::new(log_event));
        Ok(deployment)
    }

    pub fn save(&self, deployment: &Deployment) -> anyhow::Result<()> {
        std::fs::create_dir_all(&self.dir)
            .with_context(|| format!("creating {}", self.dir.display()))?;
        deployment.data.store().snapshot()?.write_to(&self.data)?;
        deployment.model.store().snapshot()?.write_to(&self.model)?;
        Ok(())
    }
}

fn log_event(event: &RegistryEvent) {
    match event {
        RegistryEvent::Mapped {
            flavor,
            claimant,
            provider,
            hash,
            created,
        } => tracing::info!(%flavor, %claimant, %provider, %hash, created, "mapping recorded"),
        RegistryEvent::Verified {
            flavor,
            provider,
            claimant,
            hash,
        } => tracing::info!(%flavor, %provider, %claimant, %hash, "possession verified"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn id(s: &str) -> Identity {
        Identity::new(s)
    }

    fn payload(s: &str) -> HashInput {
        HashInput {
            hash: None,
            payload: Some(s.to_string()),
            payload_file: None,
        }
    }

    fn map_cmd(flavor: FlavorKind, caller: &str, provider: &str, data: &str) -> Command {
        Command::Map {
            flavor,
            caller: id(caller),
            provider: id(provider),
            input: payload(data),
        }
    }

    fn verify_cmd(flavor: FlavorKind, caller: &str, data: &str) -> Command {
        Command::Verify {
            flavor,
            caller: id(caller),
            input: payload(data),
        }
    }

    #[test]
    fn hash_command_matches_crypto_helper() {
        let mut deployment = Deployment::provision();
        let out = execute(
            Command::Hash {
                input: payload("ThisIsData1234"),
            },
            &mut deployment,
        )
        .unwrap();
        assert!(!out.mutated);
        assert_eq!(
            out.text,
            ppml_crypto::hash_payload(b"ThisIsData1234").to_string()
        );
    }

    #[test]
    fn map_verify_list_flow() {
        let mut deployment = Deployment::provision();

        let out = execute(
            map_cmd(FlavorKind::Data, "owner", "cloud", "ThisIsData1234"),
            &mut deployment,
        )
        .unwrap();
        assert!(out.mutated);
        assert!(out.text.starts_with("created data confirmation #0"));

        let out = execute(
            verify_cmd(FlavorKind::Data, "cloud", "ThisIsCorruptedData1234"),
            &mut deployment,
        )
        .unwrap();
        assert!(!out.mutated);

        let out = execute(
            verify_cmd(FlavorKind::Data, "cloud", "ThisIsData1234"),
            &mut deployment,
        )
        .unwrap();
        assert_eq!(out.text, "verified confirmation #0 from owner");

        let out = execute(
            Command::List {
                flavor: FlavorKind::Data,
                provider: id("cloud"),
            },
            &mut deployment,
        )
        .unwrap();
        assert!(out.text.starts_with("0\towner\t0x"));
        assert!(out.text.ends_with("\tverified"));

        let out = execute(
            Command::Providers {
                flavor: FlavorKind::Model,
            },
            &mut deployment,
        )
        .unwrap();
        assert!(out.text.is_empty());
    }

    #[test]
    fn duplicate_mapping_surfaces_as_error() {
        let mut deployment = Deployment::provision();
        execute(
            map_cmd(FlavorKind::Model, "owner", "cloud", "ThisIsAModel42"),
            &mut deployment,
        )
        .unwrap();
        assert!(execute(
            map_cmd(FlavorKind::Model, "owner", "cloud", "ThisIsAModel42"),
            &mut deployment,
        )
        .is_err());
    }

    #[test]
    fn state_files_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let config = CliConfig {
            state_dir: dir.path().join("state"),
            ..CliConfig::default()
        };
        let files = StateFiles::from_config(&config);

        let mut deployment = files.load(&config).unwrap();
        execute(
            map_cmd(FlavorKind::Model, "owner", "cloud", "ModelIs98%Accurate"),
            &mut deployment,
        )
        .unwrap();
        files.save(&deployment).unwrap();

        let reloaded = files.load(&config).unwrap();
        let confirmations = reloaded.model.get_model_confirmations(&id("cloud")).unwrap();
        assert_eq!(confirmations.len(), 1);
        assert_eq!(
            confirmations[0].hash,
            ppml_crypto::hash_payload(b"ModelIs98%Accurate")
        );
        assert!(reloaded.data.providers().unwrap().is_empty());
    }
}
