use super::*;
use crate::compositor::opts::CompositorOpts;
use crate::compositor::report::RenderReport;
use crate::document::defs::Definitions;
use crate::render::registry::builtin_registry;
use crate::scene::hierarchy::LayerTree;
use crate::scene::props::{AudioProps, VideoProps};

fn render(renderer: &dyn LayerRenderer, props: LayerProps) -> LayerdocResult<Option<Element>> {
    let layers = [Layer::new("m", props)];
    let tree = LayerTree::from_layers(&layers);
    let mut defs = Definitions::new();
    let mut report = RenderReport::default();
    let opts = CompositorOpts::default();
    let mut ctx = RenderContext::new(&tree, builtin_registry(), &mut defs, &mut report, &opts);
    renderer.render(&layers[0], &mut ctx)
}

fn video(poster: Option<&str>) -> LayerProps {
    LayerProps::Video(VideoProps {
        src: "clip.mp4".to_owned(),
        poster: poster.map(str::to_owned),
    })
}

#[test]
fn poster_frame_with_play_glyph() {
    let g = render(&VideoRenderer, video(Some("poster.jpg"))).unwrap().unwrap();
    let img = g.find_child("image").unwrap();
    assert_eq!(img.attr("href"), Some("poster.jpg"));
    assert_eq!(img.attr("preserveAspectRatio"), Some("xMidYMid slice"));
    let glyph = g.find_child("path").unwrap();
    assert!(glyph.attr("d").unwrap().ends_with(" Z"));
}

#[test]
fn missing_poster_draws_dark_placeholder() {
    let g = render(&VideoRenderer, video(None)).unwrap().unwrap();
    assert_eq!(g.find_child("rect").and_then(|r| r.attr("fill")), Some("#111827"));
    assert!(g.find_child("text").is_none());
    assert!(g.find_child("path").is_some());
}

#[test]
fn unsafe_poster_fails() {
    assert!(render(&VideoRenderer, video(Some("javascript:alert(1)"))).is_err());
}

#[test]
fn audio_draws_nothing() {
    let out = render(&AudioRenderer, LayerProps::Audio(AudioProps::default())).unwrap();
    assert!(out.is_none());
}
