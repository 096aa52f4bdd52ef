//! Walks through what the developer preview does under the hood: render a frame document, read
//! its meta-tags back, and sign the simulated action a button press would replay.

// crates.io
use color_eyre::Result;
use url::Url;
// self
use frame_broker::{
	context::{FrameContext, FramePath},
	frame::{Button, Frame, ImageScene, ImageSource, TextInput},
	preview::{PreviewAction, extract_frame_tags, sign_preview_action},
	routes::FrameBroker,
};

async fn greeter(_ctx: FrameContext) -> frame_broker::error::Result<Frame> {
	Frame::builder(ImageSource::scene(ImageScene::new(["Say hello"])))
		.title("Greeter")
		.input(TextInput::new("Your name"))
		.button(Button::post("Greet"))
		.build()
		.map_err(Into::into)
}

#[tokio::main]
async fn main() -> Result<()> {
	color_eyre::install()?;

	let broker =
		FrameBroker::new(Url::parse("https://frames.example.com")?)?.frame("/greeter", greeter)?;
	let path: FramePath = "/greeter".parse()?;
	let html = broker.render_initial(&path).await?;
	let parsed = extract_frame_tags(&html);

	println!("Rendered document:\n{html}");
	println!("Post URL: {}.", parsed.post_url.as_deref().unwrap_or("<missing>"));

	let frame_url = broker.frame_url(&path);
	let signed = sign_preview_action(&PreviewAction {
		frame_url: &frame_url,
		button_index: 1,
		input_text: Some("Ferris"),
	})?;

	println!(
		"Signed action payload:\n{}",
		serde_json::to_string_pretty(&signed.request)?
	);
	println!("Ephemeral verifying key: {}.", hex::encode(signed.verifying_key.to_bytes()));

	Ok(())
}
