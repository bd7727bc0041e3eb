//! The default project every session starts from.
use crate::tree::FileNode;

/// File selected in the editor when a session starts.
pub const DEFAULT_SELECTION: &str = "index-md";

const INDEX_MD: &str = r#"---
layout: base.njk
title: Welcome to 11ty
---

# Welcome to Your 11ty Site!

This is your homepage. Edit this file to customize your content.

## Getting Started

- Edit templates in the `_includes` folder
- Add pages in the `src` folder
- Configure your site in `.eleventy.js`

Happy building! 🚀
"#;

const ABOUT_MD: &str = r#"---
layout: base.njk
title: About
---

# About

This is the about page of your 11ty site.
"#;

const BASE_NJK: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>{{ title }} | My 11ty Site</title>
    <style>
        body {
            font-family: system-ui, -apple-system, sans-serif;
            line-height: 1.6;
            max-width: 800px;
            margin: 0 auto;
            padding: 2rem;
            color: #333;
        }
        nav ul {
            list-style: none;
            padding: 0;
            display: flex;
            gap: 1rem;
            margin-bottom: 2rem;
        }
        nav a {
            text-decoration: none;
            color: #0066cc;
        }
        nav a:hover {
            text-decoration: underline;
        }
        h1, h2, h3 {
            color: #2c3e50;
        }
    </style>
</head>
<body>
    <nav>
        <ul>
            <li><a href="/">Home</a></li>
            <li><a href="/about/">About</a></li>
        </ul>
    </nav>

    <main>
        {{ content | safe }}
    </main>
</body>
</html>
"#;

const ELEVENTY_JS: &str = r#"module.exports = function(eleventyConfig) {
  // Copy static files
  eleventyConfig.addPassthroughCopy("src/assets");

  return {
    dir: {
      input: "src",
      output: "_site",
      includes: "_includes",
      layouts: "_includes"
    },
    templateFormats: ["md", "njk", "html"],
    markdownTemplateEngine: "njk",
    htmlTemplateEngine: "njk",
    dataTemplateEngine: "njk"
  };
};
"#;

const PACKAGE_JSON: &str = r#"{
  "name": "my-eleventy-site",
  "version": "1.0.0",
  "scripts": {
    "build": "eleventy",
    "serve": "eleventy --serve"
  },
  "dependencies": {
    "@11ty/eleventy": "^2.0.1"
  }
}
"#;

pub fn default_project() -> Vec<FileNode> {
    vec![
        FileNode::folder(
            "src",
            "src",
            "src",
            vec![
                FileNode::file("index-md", "index.md", "src/index.md", INDEX_MD),
                FileNode::file("about-md", "about.md", "src/about.md", ABOUT_MD),
                FileNode::folder(
                    "includes",
                    "_includes",
                    "src/_includes",
                    vec![FileNode::file(
                        "base-njk",
                        "base.njk",
                        "src/_includes/base.njk",
                        BASE_NJK,
                    )],
                ),
            ],
        ),
        FileNode::file("eleventy-js", ".eleventy.js", ".eleventy.js", ELEVENTY_JS),
        FileNode::file("package-json", "package.json", "package.json", PACKAGE_JSON),
    ]
}
