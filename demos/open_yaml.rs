//! Opens a mock password connector wrapped with a static and a YAML-file group source, then
//! logs in and prints the augmented groups.

// std
use std::io::Write;
// crates.io
use color_eyre::{Result, eyre::eyre};
use tempfile::NamedTempFile;
// self
use extra_groups::{Config, ConnectorRegistry, GroupSourceRegistry, Scopes};

#[tokio::main]
async fn main() -> Result<()> {
	color_eyre::install()?;

	let mut groups = NamedTempFile::new()?;

	writeln!(groups, "kilgore@kilgore.trout:\n  - editors\n  - reviewers")?;

	let document = format!(
		r#"
connector:
  type: mockPassword
  name: Demo
  id: demo
  config:
    username: kilgore
    password: trout
groupsources:
  - type: mock
    prefix: "static:"
    config:
      groups: [everyone]
  - type: yaml
    prefix: "file:"
    config:
      filename: {}
"#,
		groups.path().display()
	);
	let connector = Config::from_yaml(&document)?
		.open(&ConnectorRegistry::default(), &GroupSourceRegistry::default())?;
	let password =
		connector.as_password().ok_or_else(|| eyre!("demo connector lost its password capability"))?;
	let outcome = password.login(Scopes { groups: true, ..Default::default() }, "kilgore", "trout").await?;
	let identity = outcome.identity().ok_or_else(|| eyre!("demo credentials were rejected"))?;

	println!("{} ({}) is in {:?}.", identity.username, identity.email, identity.groups);

	Ok(())
}
