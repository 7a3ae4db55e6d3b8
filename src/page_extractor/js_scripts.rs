//! JavaScript evaluated inside the audited page

/// Collects the title, the meta description and every `og:*` / `twitter:*` tag.
///
/// Keys are lowercased and later duplicates overwrite earlier ones. A tag
/// without `content` is reported as `null`. No fallback logic happens here.
pub const SOCIAL_METADATA_SCRIPT: &str = r#"
(() => {
    const titleNode = document.querySelector("title");
    const descriptionNode = document.querySelector("meta[name=\"description\"]");
    const metas = {
        basic: {
            title: titleNode ? titleNode.textContent.trim() : "",
            description: descriptionNode ? (descriptionNode.getAttribute("content") || "") : ""
        },
        facebook: {},
        twitter: {}
    };

    for (const node of document.querySelectorAll("meta[property^=\"og:\"]")) {
        metas.facebook[node.getAttribute("property").toLowerCase()] = node.getAttribute("content");
    }

    for (const node of document.querySelectorAll("meta[name^=\"twitter:\"]")) {
        metas.twitter[node.getAttribute("name").toLowerCase()] = node.getAttribute("content");
    }

    return metas;
})()
"#;
