use crate::player::{ParamsError, PlayerControlParams};
use bevy::asset::io::Reader;
use bevy::asset::{AssetLoader, LoadContext};
use thiserror::Error;

#[derive(Default)]
pub struct PlayerAssetLoader;

#[derive(Debug, Error)]
pub enum PlayerAssetLoaderError {
	#[error("Could not load asset: {0}")]
	Io(#[from] std::io::Error),

	#[error("Could not parse RON: {0}")]
	Ron(#[from] ron::de::SpannedError),

	#[error("Invalid player params: {0}")]
	Invalid(#[from] ParamsError),
}

/// Parse and validate player params from the bytes of a `.ron` file
pub fn parse_player_params(bytes: &[u8]) -> Result<PlayerControlParams, PlayerAssetLoaderError> {
	let params = ron::de::from_bytes::<PlayerControlParams>(bytes)?;
	params.validate()?;
	Ok(params)
}

impl AssetLoader for PlayerAssetLoader {
	type Asset = PlayerControlParams;
	type Settings = ();
	type Error = PlayerAssetLoaderError;

	async fn load(
		&self,
		reader: &mut dyn Reader,
		_settings: &Self::Settings,
		_load_context: &mut LoadContext<'_>,
	) -> Result<Self::Asset, Self::Error> {
		let mut bytes = Vec::new();
		reader.read_to_end(&mut bytes).await?;
		parse_player_params(&bytes)
	}

	fn extensions(&self) -> &[&str] {
		&["ron"]
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn loads_shipped_file() {
		let params = parse_player_params(include_bytes!("../../assets/player.ron")).expect("valid");
		assert_eq!(params.combat.laser_range, 50.0);
	}

	#[test]
	fn reports_syntax_errors() {
		let err = parse_player_params(b"(move: ").unwrap_err();
		assert!(matches!(err, PlayerAssetLoaderError::Ron(_)));
	}

	#[test]
	fn reports_invalid_values() {
		let text = include_str!("../../assets/player.ron").replace("contact_damage: 10", "contact_damage: 0");
		let err = parse_player_params(text.as_bytes()).unwrap_err();
		assert!(matches!(err, PlayerAssetLoaderError::Invalid(ParamsError::NotPositive(_))));
	}
}
