//! Kinds command

use crate::cli::KindsArgs;
use crate::output;
use anyhow::Result;
use serde::Serialize;
use skim_core::extractors::builtin_gvks;
use skim_core::imageless::IMAGELESS_GVKS;

/// Resource kinds known to the extractor
#[derive(Debug, Serialize)]
struct KnownKinds {
    /// Kinds with an extraction rule, in dispatch table order
    supported: Vec<&'static str>,
    /// Kinds that never reference images, sorted
    imageless: Vec<&'static str>,
}

impl KnownKinds {
    fn collect() -> Self {
        let mut imageless = IMAGELESS_GVKS.to_vec();
        imageless.sort_unstable();
        Self {
            supported: builtin_gvks().collect(),
            imageless,
        }
    }
}

pub fn run(args: KindsArgs) -> Result<()> {
    let kinds = KnownKinds::collect();

    if args.json {
        println!("{}", serde_json::to_string_pretty(&kinds)?);
        return Ok(());
    }

    output::header(&format!("Supported kinds ({})", kinds.supported.len()));
    for gvk in &kinds.supported {
        output::item(gvk, None);
    }
    println!();
    output::header(&format!("Imageless kinds ({})", kinds.imageless.len()));
    for gvk in &kinds.imageless {
        output::item(gvk, Some("no images"));
    }

    Ok(())
}
