use atomcanvas_core::render::html::{DOCUMENT_HEAD, DOCUMENT_TAIL};
use atomcanvas_core::{
    render_atom, render_document, style_declaration, AtomId, AtomKind, AtomNode, CanvasState,
};
use serde_json::json;

fn body_of(document: &str) -> &str {
    document
        .strip_prefix(DOCUMENT_HEAD)
        .and_then(|rest| rest.strip_suffix(DOCUMENT_TAIL))
        .expect("document should carry the fixed wrapper")
}

fn root_with_child() -> CanvasState {
    CanvasState::from_json_str(
        &json!({
            "atoms": {
                "root": { "kind": "box", "properties": {}, "children": ["child"] },
                "child": { "kind": "text", "properties": { "text": "Hi" }, "children": [] }
            },
            "rootAtomIds": ["root"]
        })
        .to_string(),
    )
    .unwrap()
}

#[test]
fn renders_nested_text_inside_container() {
    let html = render_document(&root_with_child());

    assert_eq!(
        html,
        concat!(
            "<!DOCTYPE html><html><head><style>body{margin:0;}</style></head><body>",
            r#"<div id="root" style=""><div id="child" style="">Hi</div></div>"#,
            "</body></html>"
        )
    );
}

#[test]
fn repeated_renders_are_byte_identical() {
    let mut canvas = root_with_child();
    canvas.insert_atom(
        "banner",
        AtomNode::image("hero.png")
            .with_property("width", 640_i64)
            .with_property("border", "1px solid"),
    );
    canvas.push_root("banner");

    let first = render_document(&canvas);
    let second = render_document(&canvas);
    assert_eq!(first, second);
}

#[test]
fn render_does_not_mutate_canvas() {
    let canvas = root_with_child();
    let snapshot = canvas.clone();
    let _ = render_document(&canvas);
    assert_eq!(canvas, snapshot);
}

#[test]
fn missing_root_renders_like_removed_root() {
    let with_ghost = {
        let mut canvas = root_with_child();
        canvas.root_atom_ids.insert(0, AtomId::from("ghost"));
        canvas.push_root("also-missing");
        canvas
    };

    assert_eq!(
        render_document(&with_ghost),
        render_document(&root_with_child())
    );
}

#[test]
fn missing_child_contributes_nothing() {
    let mut canvas = CanvasState::new();
    canvas.insert_atom(
        "list",
        AtomNode::container()
            .with_child("a")
            .with_child("deleted")
            .with_child("b"),
    );
    canvas.insert_atom("a", AtomNode::text("A"));
    canvas.insert_atom("b", AtomNode::text("B"));
    canvas.push_root("list");

    assert_eq!(
        body_of(&render_document(&canvas)),
        r#"<div id="list" style=""><div id="a" style="">A</div><div id="b" style="">B</div></div>"#
    );
}

#[test]
fn text_body_is_exactly_text_property() {
    let mut canvas = CanvasState::new();
    canvas.insert_atom("greeting", AtomNode::text("Hello").with_child("ignored"));
    canvas.insert_atom("ignored", AtomNode::text("should not appear"));
    canvas.push_root("greeting");

    assert_eq!(
        body_of(&render_document(&canvas)),
        r#"<div id="greeting" style="">Hello</div>"#
    );
}

#[test]
fn text_without_body_renders_empty() {
    let mut canvas = CanvasState::new();
    canvas.insert_atom("blank", AtomNode::new(AtomKind::Text));
    assert_eq!(
        render_atom(&canvas, &AtomId::from("blank")),
        r#"<div id="blank" style=""></div>"#
    );
}

#[test]
fn image_is_self_closing_and_ignores_children() {
    let mut canvas = CanvasState::new();
    canvas.insert_atom(
        "logo",
        AtomNode::image("a.png")
            .with_property("width", "32px")
            .with_child("caption"),
    );
    canvas.insert_atom("caption", AtomNode::text("never rendered"));
    canvas.push_root("logo");

    let body = render_document(&canvas);
    assert_eq!(
        body_of(&body),
        r#"<img id="logo" style="width:32px" src="a.png" />"#
    );
    assert!(!body.contains("never rendered"));
}

#[test]
fn image_without_src_has_empty_reference() {
    let mut canvas = CanvasState::new();
    canvas.insert_atom("pic", AtomNode::new(AtomKind::Image));
    assert_eq!(
        render_atom(&canvas, &AtomId::from("pic")),
        r#"<img id="pic" style="" src="" />"#
    );
}

#[test]
fn box_concatenates_children_in_listed_order() {
    let mut canvas = CanvasState::new();
    canvas.insert_atom(
        "row",
        AtomNode::container()
            .with_property("display", "flex")
            .with_child("second")
            .with_child("first"),
    );
    canvas.insert_atom("first", AtomNode::text("1"));
    canvas.insert_atom("second", AtomNode::text("2"));

    assert_eq!(
        render_atom(&canvas, &AtomId::from("row")),
        concat!(
            r#"<div id="row" style="display:flex">"#,
            r#"<div id="second" style="">2</div><div id="first" style="">1</div>"#,
            "</div>"
        )
    );
}

#[test]
fn unknown_kind_falls_back_to_container() {
    let canvas = CanvasState::from_json_str(
        &json!({
            "atoms": {
                "v": { "kind": "video", "properties": { "src": "clip.mp4" }, "children": ["t"] },
                "t": { "kind": "text", "properties": { "text": "caption" } }
            },
            "rootAtomIds": ["v"]
        })
        .to_string(),
    )
    .unwrap();

    assert_eq!(
        body_of(&render_document(&canvas)),
        r#"<div id="v" style=""><div id="t" style="">caption</div></div>"#
    );
}

#[test]
fn content_properties_never_reach_style() {
    let node = AtomNode::text("body")
        .with_property("color", "red")
        .with_property("src", "x.png")
        .with_property("font-size", 14_i64);

    let style = style_declaration(&node.properties);
    assert_eq!(style, "color:red;font-size:14");
    assert!(!style.contains("text"));
    assert!(!style.contains("src"));
}

#[test]
fn style_follows_wire_property_order() {
    let canvas = CanvasState::from_json_str(
        r#"{"atoms":{"b":{"kind":"box","properties":{"z-index":2,"color":"red","opacity":0.5}}},"rootAtomIds":["b"]}"#,
    )
    .unwrap();

    assert_eq!(
        body_of(&render_document(&canvas)),
        r#"<div id="b" style="z-index:2;color:red;opacity:0.5"></div>"#
    );
}

#[test]
fn markup_in_values_is_escaped() {
    let mut canvas = CanvasState::new();
    canvas.insert_atom("t", AtomNode::text("<b>bold</b> & \"quoted\""));

    assert_eq!(
        render_atom(&canvas, &AtomId::from("t")),
        r#"<div id="t" style="">&lt;b&gt;bold&lt;/b&gt; &amp; &quot;quoted&quot;</div>"#
    );
}

#[test]
fn cyclic_children_terminate() {
    let mut canvas = CanvasState::new();
    canvas.insert_atom("a", AtomNode::container().with_child("b"));
    canvas.insert_atom("b", AtomNode::container().with_child("a"));
    canvas.push_root("a");

    assert_eq!(
        body_of(&render_document(&canvas)),
        r#"<div id="a" style=""><div id="b" style=""></div></div>"#
    );
}

#[test]
fn shared_child_renders_under_each_parent() {
    let mut canvas = CanvasState::new();
    canvas.insert_atom("left", AtomNode::container().with_child("shared"));
    canvas.insert_atom("right", AtomNode::container().with_child("shared"));
    canvas.insert_atom("shared", AtomNode::text("s"));
    canvas.push_root("left");
    canvas.push_root("right");

    let html = render_document(&canvas);
    assert_eq!(html.matches(r#"<div id="shared" style="">s</div>"#).count(), 2);
}

#[test]
fn empty_canvas_renders_bare_wrapper() {
    assert_eq!(
        render_document(&CanvasState::new()),
        format!("{DOCUMENT_HEAD}{DOCUMENT_TAIL}")
    );
}

#[test]
fn deeply_nested_chain_renders_without_overflow() {
    const DEPTH: usize = 100_000;
    let mut canvas = CanvasState::new();
    for level in 0..DEPTH {
        canvas.insert_atom(
            format!("n{level}"),
            AtomNode::container().with_child(format!("n{}", level + 1)),
        );
    }
    canvas.insert_atom(format!("n{DEPTH}"), AtomNode::text("bottom"));
    canvas.push_root("n0");

    let body = render_document(&canvas);
    let body = body_of(&body);
    assert!(body.starts_with(r#"<div id="n0" style=""><div id="n1" style="">"#));
    assert!(body.contains(&format!(r#"<div id="n{DEPTH}" style="">bottom</div>"#)));
    assert_eq!(body.matches("</div>").count(), DEPTH + 1);
}
