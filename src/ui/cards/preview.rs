//! Open Graph preview of the portfolio site.

use homelab_types::OgpPreview;

use crate::query::QueryState;
use crate::ui::card::{CardLine, CardView, Fragment};

pub fn card(state: &QueryState<OgpPreview>, site_url: Option<&str>) -> CardView {
    let mut view = CardView::new("Link Preview", "⧉");
    if let Some(url) = site_url {
        view = view.link(url);
    }
    view.from_state(state, 2, |ogp| {
        let graph = &ogp.hybrid_graph;
        vec![
            CardLine::headline(graph.title.clone()),
            CardLine::text(graph.description.clone()),
            CardLine::Text(vec![Fragment::dim(format!("image: {}", graph.image))]),
        ]
    })
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::ui::card::CardBody;

    #[test]
    fn test_title_and_description() {
        let ogp: OgpPreview = serde_json::from_value(serde_json::json!({
            "hybridGraph": {
                "image": "https://example.dev/og.png",
                "title": "Example Dev",
                "description": "Software engineer"
            }
        }))
        .unwrap();
        let card = card(&QueryState::Success(Arc::new(ogp)), Some("https://example.dev"));
        assert_eq!(card.body_text()[..2], ["Example Dev", "Software engineer"]);
    }

    #[test]
    fn test_pending_skeleton() {
        assert_eq!(card(&QueryState::Pending, None).body, CardBody::Skeleton(2));
    }
}
