//! Command-line arguments and the validated configuration built from them.

use std::path::PathBuf;

use anyhow::{Result, bail};
use clap::Args;
use geo_ingest::{DEFAULT_TOPOLOGY_OBJECT, TopoJsonConverter, TopologySource};

use crate::html::map_page::MapViewport;

/// Boundary document served next to the site by default.
pub const DEFAULT_GEOMETRY_LOCATION: &str = "public/ca-districts-topo.json";

/// Where the district boundaries come from.
#[derive(Debug, Args)]
pub struct GeometryArgs {
    /// Boundary document: a file path or an http(s) URL.
    #[arg(long = "geometry", value_name = "PATH|URL", default_value = DEFAULT_GEOMETRY_LOCATION)]
    pub geometry: String,
    /// TopoJSON object holding the district polygons.
    #[arg(long = "topology-object", value_name = "NAME", default_value = DEFAULT_TOPOLOGY_OBJECT)]
    pub topology_object: String,
}

/// Arguments accepted by the `serve` subcommand.
#[derive(Debug, Args)]
pub struct ServeArgs {
    /// Interface to listen on.
    #[arg(long = "bind", value_name = "ADDR", default_value = "127.0.0.1")]
    pub bind: String,
    /// TCP port to listen on.
    #[arg(long = "port", value_name = "PORT", default_value_t = 8080)]
    pub port: u16,
    #[command(flatten)]
    pub geometry: GeometryArgs,
    /// Emit Chrome trace JSON for post-mortem analysis.
    #[arg(long = "chrome-trace", value_name = "PATH")]
    pub chrome_trace: Option<PathBuf>,
}

#[derive(Clone, Debug)]
pub struct GeometryConfig {
    pub location: String,
    pub topology_object: String,
}

impl GeometryConfig {
    pub fn source(&self) -> TopologySource {
        TopologySource::from_location(&self.location)
    }

    pub fn converter(&self) -> TopoJsonConverter {
        TopoJsonConverter::new(self.topology_object.clone())
    }
}

impl TryFrom<GeometryArgs> for GeometryConfig {
    type Error = anyhow::Error;

    fn try_from(args: GeometryArgs) -> Result<Self> {
        let location = args.geometry.trim().to_string();
        if location.is_empty() {
            bail!("--geometry must not be empty");
        }
        if args.topology_object.trim().is_empty() {
            bail!("--topology-object must not be empty");
        }
        Ok(Self {
            location,
            topology_object: args.topology_object,
        })
    }
}

#[derive(Clone, Debug, Default)]
/// Optional telemetry knobs.
pub struct TelemetryOptions {
    /// Write a Chrome trace JSON file capturing request spans.
    pub chrome_trace_path: Option<PathBuf>,
}

#[derive(Clone, Debug)]
/// Everything the server needs to start.
pub struct SiteConfig {
    pub bind: String,
    pub port: u16,
    pub geometry: GeometryConfig,
    pub viewport: MapViewport,
    pub telemetry: TelemetryOptions,
}

impl TryFrom<ServeArgs> for SiteConfig {
    type Error = anyhow::Error;

    fn try_from(args: ServeArgs) -> Result<Self> {
        if args.port == 0 {
            bail!("--port must be between 1 and 65535");
        }
        if args.bind.trim().is_empty() {
            bail!("--bind must not be empty");
        }
        Ok(Self {
            bind: args.bind,
            port: args.port,
            geometry: args.geometry.try_into()?,
            viewport: MapViewport::default(),
            telemetry: TelemetryOptions {
                chrome_trace_path: args.chrome_trace,
            },
        })
    }
}

#[cfg(test)]
mod tests {
    use clap::Parser;

    use super::*;
    use crate::cli::{Cli, Command};

    fn serve(args: &[&str]) -> ServeArgs {
        let argv = ["portfolio", "serve"].into_iter().chain(args.iter().copied());
        match Cli::parse_from(argv).command {
            Command::Serve(args) => args,
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn defaults() {
        let config = SiteConfig::try_from(serve(&[])).unwrap();
        assert_eq!(config.bind, "127.0.0.1");
        assert_eq!(config.port, 8080);
        assert_eq!(config.geometry.location, DEFAULT_GEOMETRY_LOCATION);
        assert_eq!(config.geometry.topology_object, DEFAULT_TOPOLOGY_OBJECT);
        assert!(!config.geometry.source().is_remote());
        assert!(config.telemetry.chrome_trace_path.is_none());
    }

    #[test]
    fn flags_override_defaults() {
        let config = SiteConfig::try_from(serve(&[
            "--bind",
            "0.0.0.0",
            "--port",
            "3000",
            "--geometry",
            "https://example.org/ca-districts-topo.json",
            "--topology-object",
            "districts",
            "--chrome-trace",
            "trace.json",
        ]))
        .unwrap();
        assert_eq!(config.bind, "0.0.0.0");
        assert_eq!(config.port, 3000);
        assert!(config.geometry.source().is_remote());
        assert_eq!(config.geometry.converter().object(), "districts");
        assert_eq!(
            config.telemetry.chrome_trace_path,
            Some(PathBuf::from("trace.json"))
        );
    }

    #[test]
    fn rejects_port_zero() {
        let err = SiteConfig::try_from(serve(&["--port", "0"])).unwrap_err();
        assert!(err.to_string().contains("--port"));
    }

    #[test]
    fn rejects_blank_topology_object() {
        let err = SiteConfig::try_from(serve(&["--topology-object", " "])).unwrap_err();
        assert!(err.to_string().contains("--topology-object"));
    }
}
