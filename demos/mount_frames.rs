//! Mounts a stateful counter frame and serves it locally. Open
//! `http://127.0.0.1:8787/counter/dev` in a browser to drive it through the signed preview.

// crates.io
use color_eyre::Result;
use url::Url;
// self
use frame_broker::{
	context::{FrameContext, FrameStatus},
	frame::{Button, Frame, ImageScene, ImageSource},
	routes::FrameBroker,
};

async fn counter(ctx: FrameContext) -> frame_broker::error::Result<Frame> {
	let count = ctx
		.state
		.as_ref()
		.and_then(|state| state.get("count"))
		.and_then(|count| count.as_u64())
		.unwrap_or(0);
	let caption = match ctx.status {
		FrameStatus::Initial => "Press + to start counting".to_owned(),
		FrameStatus::Response => format!("Count is {count}"),
	};

	Frame::builder(ImageSource::scene(ImageScene::new([caption])))
		.title("Counter")
		.button(Button::post("+1"))
		.button(Button::post("Reset"))
		.state(serde_json::json!({
			"count": if ctx.button_index == Some(2) { 0 } else { count + 1 }
		}))
		.build()
		.map_err(Into::into)
}

#[tokio::main]
async fn main() -> Result<()> {
	color_eyre::install()?;

	let broker = FrameBroker::new(Url::parse("http://127.0.0.1:8787")?)?
		.frame("/counter", counter)?;

	for path in broker.paths() {
		println!("Frame mounted on {path} (preview at {path}/dev).");
	}

	let listener = tokio::net::TcpListener::bind("127.0.0.1:8787").await?;

	axum::serve(listener, broker.into_router()).await?;

	Ok(())
}
