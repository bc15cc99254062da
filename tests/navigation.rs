//  ██████╗  █████╗ ███████╗███████╗██╗███╗   ██╗ ██████╗
//  ██╔══██╗██╔══██╗██╔════╝██╔════╝██║████╗  ██║██╔════╝
//  ██████╔╝███████║███████╗███████╗██║██╔██╗ ██║██║  ███╗
//  ██╔═══╝ ██╔══██║╚════██║╚════██║██║██║╚██╗██║██║   ██║
//  ██║     ██║  ██║███████║███████║██║██║ ╚████║╚██████╔╝
//  ╚═╝     ╚═╝  ╚═╝╚══════╝╚══════╝╚═╝╚═╝  ╚═══╝ ╚═════╝

#[allow(dead_code)]
mod common {
    include!("common/mod.rs");
}

#[cfg(test)]
mod passing {
    use docnav::{convert_nav_html_to_json, NavLink, NavNode};
    use serde_json::json;

    use crate::common::{GUIDES_NAV, MIXED_NAV};

    #[test]
    fn caption_wraps_group_and_link() {
        let tree = convert_nav_html_to_json(GUIDES_NAV).unwrap();

        assert_eq!(
            tree,
            vec![NavNode::SectionGroup {
                title: "Guides".to_string(),
                items: vec![
                    NavNode::ExpandableLinkGroup {
                        text: "Installing".to_string(),
                        href: "guides/install".to_string(),
                        items: vec![
                            NavLink::new("Linux", "guides/install/linux"),
                            NavLink::new("Windows", "guides/install/windows"),
                        ],
                    },
                    NavNode::Divider,
                    NavNode::Link {
                        text: "Usage".to_string(),
                        href: "guides/usage".to_string(),
                    },
                ],
            }]
        );
    }

    #[test]
    fn caption_tree_as_json() {
        let tree = convert_nav_html_to_json(GUIDES_NAV).unwrap();

        assert_eq!(
            serde_json::to_value(&tree).unwrap(),
            json!([{
                "type": "section-group",
                "title": "Guides",
                "items": [
                    {
                        "type": "expandable-link-group",
                        "text": "Installing",
                        "href": "guides/install",
                        "items": [
                            {"type": "link", "text": "Linux", "href": "guides/install/linux"},
                            {"type": "link", "text": "Windows", "href": "guides/install/windows"},
                        ],
                    },
                    {"type": "divider"},
                    {"type": "link", "text": "Usage", "href": "guides/usage"},
                ],
            }])
        );
    }

    #[test]
    fn flat_list_then_caption_group() {
        let tree = convert_nav_html_to_json(MIXED_NAV).unwrap();

        assert_eq!(
            tree,
            vec![
                NavNode::Link {
                    text: "Home".to_string(),
                    href: "".to_string(),
                },
                NavNode::SectionGroup {
                    title: "Reference".to_string(),
                    items: vec![
                        NavNode::Link {
                            text: "CLI".to_string(),
                            href: "ref/cli".to_string(),
                        },
                        NavNode::Divider,
                        NavNode::Section {
                            text: "Formats".to_string(),
                            items: vec![NavLink::new("JSON", "ref/formats/json")],
                        },
                    ],
                },
            ]
        );
    }

    #[test]
    fn flat_links_have_no_dividers() {
        let html = (1..=5)
            .map(|i| format!(r#"<li><a href="/p{i}/">P{i}</a></li>"#))
            .collect::<String>();
        let tree = convert_nav_html_to_json(&format!("<ul>{html}</ul>")).unwrap();

        assert_eq!(tree.len(), 5);
        for (i, node) in tree.iter().enumerate() {
            assert_eq!(
                node,
                &NavNode::Link {
                    text: format!("P{}", i + 1),
                    href: format!("p{}", i + 1),
                }
            );
        }
    }

    #[test]
    fn separate_lists_are_concatenated() {
        let tree = convert_nav_html_to_json(
            r#"<ul><li><a href="a">A</a></li></ul><ul><li><a href="b">B</a><ul><li><a href="b/1">B1</a></li></ul></li></ul>"#,
        )
        .unwrap();

        assert_eq!(tree.len(), 3);
        assert_eq!(tree[1], NavNode::Divider);
    }

    #[test]
    fn empty_fragment() {
        assert_eq!(convert_nav_html_to_json("").unwrap(), vec![]);
    }
}

//  ███████╗ █████╗ ██╗██╗     ██╗███╗   ██╗ ██████╗
//  ██╔════╝██╔══██╗██║██║     ██║████╗  ██║██╔════╝
//  █████╗  ███████║██║██║     ██║██╔██╗ ██║██║  ███╗
//  ██╔══╝  ██╔══██║██║██║     ██║██║╚██╗██║██║   ██║
//  ██║     ██║  ██║██║███████╗██║██║ ╚████║╚██████╔╝
//  ╚═╝     ╚═╝  ╚═╝╚═╝╚══════╝╚═╝╚═╝  ╚═══╝ ╚═════╝

#[cfg(test)]
mod failing {
    use docnav::{convert_nav_html_to_json, DocnavError};

    #[test]
    fn anchor_without_href() {
        let error = convert_nav_html_to_json(r#"<ul><li><a>Broken</a></li></ul>"#).unwrap_err();

        match error {
            DocnavError::Structure { position, message } => {
                assert_eq!(position, "ul[1]/li[1]");
                assert_eq!(message, "anchor has no href");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn position_counts_lists() {
        let error = convert_nav_html_to_json(
            r#"<ul><li><a href="a">A</a></li></ul><ul><li><a href="b">B</a></li><li>text only</li></ul>"#,
        )
        .unwrap_err();

        assert_eq!(
            error.to_string(),
            "malformed fragment at ul[2]/li[2]: list item has no leading anchor"
        );
    }
}
