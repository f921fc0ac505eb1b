//! End-to-end formatting tests: HTML source in, formatted text out.

use std::io::{self, Read, Write};

use html5ever::tendril::TendrilSink;
use html5ever::{parse_fragment, LocalName, Namespace, ParseOpts, QualName};
use htmlindent::{Error, Handle, RcDom};
use pretty_assertions::assert_eq;

struct Case {
    name: &'static str,
    input: &'static str,
    expected: &'static str,
}

const FRAGMENT_CASES: &[Case] = &[
    Case {
        name: "missing closing tags are inserted",
        input: "<li>",
        expected: "<li>\n</li>\n",
    },
    Case {
        name: "html attribute escaping is normalized",
        input: r#"<ol> <li style="&amp;&#38;"> A </li> <li> B </li> </ol> "#,
        expected: "<ol>\n <li style=\"&amp;&amp;\">A</li>\n <li>B</li>\n</ol>\n",
    },
    Case {
        name: "bare ampersands are escaped",
        input: r#"<ol> <li style="&"> A </li> <li> B </li> </ol> "#,
        expected: "<ol>\n <li style=\"&amp;\">A</li>\n <li>B</li>\n</ol>\n",
    },
    Case {
        name: "html elements are indented",
        input: r#"<ol> <li class="name"> A </li> <li> B </li> </ol> "#,
        expected: "<ol>\n <li class=\"name\">A</li>\n <li>B</li>\n</ol>\n",
    },
    Case {
        name: "text fragments are supported",
        input: "test 123",
        expected: "test 123\n",
    },
    Case {
        name: "punctuation stays on the line of the element before it",
        input: r#"<ul><li><a href="http://example.com">Test</a>.</li></ul>"#,
        expected: "<ul>\n <li>\n  <a href=\"http://example.com\">Test</a>.\n </li>\n</ul>\n",
    },
    Case {
        name: "glued punctuation keeps one separating space",
        input: "<p><a href=\"#\">x</a>   , y</p>",
        expected: "<p>\n <a href=\"#\">x</a> , y\n</p>\n",
    },
    Case {
        name: "non ascii punctuation glues",
        input: "<p><a>x</a>\u{2026} y</p>",
        expected: "<p>\n <a>x</a>\u{2026} y\n</p>\n",
    },
    Case {
        name: "thai punctuation glues",
        input: "<p><a>x</a>\u{0E4F} y</p>",
        expected: "<p>\n <a>x</a>\u{0E4F} y\n</p>\n",
    },
    Case {
        name: "style content is indented consistently",
        input: "<style>\nbody {\n  text-color: red;\n}\n</style>",
        expected: "<style>\n  body {\n    text-color: red;\n  }\n</style>\n",
    },
    Case {
        name: "script content is indented relative to its element",
        input: "<div><script>\nif (a) {\n  b();\n}\n</script></div>",
        expected: "<div>\n <script>\n   if (a) {\n     b();\n   }\n </script>\n</div>\n",
    },
    Case {
        name: "void elements never get an end tag",
        input: "<p>a<br>b</p>",
        expected: "<p>\n a\n <br>\n b\n</p>\n",
    },
    Case {
        name: "void element attributes are escaped",
        input: r#"<img src="a.png" alt='say "hi"'>"#,
        expected: "<img src=\"a.png\" alt=\"say &#34;hi&#34;\">\n",
    },
    Case {
        name: "pre content is verbatim",
        input: "<div><pre>  a\n   b <b> c </b></pre></div>",
        expected: "<div>\n <pre>  a\n   b <b> c </b></pre>\n</div>\n",
    },
    Case {
        name: "pre leading newline survives",
        input: "<pre>\n\nx</pre>",
        expected: "<pre>\n\nx</pre>\n",
    },
    Case {
        name: "nested pre leading newline survives",
        input: "<pre>a<pre>\n\nb</pre></pre>",
        expected: "<pre>a<pre>\n\nb</pre></pre>\n",
    },
    Case {
        name: "comments get their own line",
        input: "<div><!-- hi --></div>",
        expected: "<div>\n <!-- hi -->\n</div>\n",
    },
    Case {
        name: "mixed content breaks into lines",
        input: "<div><p>Hello <b>world</b></p></div>",
        expected: "<div>\n <p>\n  Hello\n  <b>world</b>\n </p>\n</div>\n",
    },
    Case {
        name: "attribute order is preserved",
        input: r#"<a z="1" b="2" m="3">x</a>"#,
        expected: "<a z=\"1\" b=\"2\" m=\"3\">x</a>\n",
    },
    Case {
        name: "foreign attributes keep their prefix",
        input: "<svg><use xlink:href=\"#a\"></use></svg>",
        expected: "<svg>\n <use xlink:href=\"#a\">\n </use>\n</svg>\n",
    },
    Case {
        name: "template contents are formatted",
        input: "<template><p>x</p></template>",
        expected: "<template>\n <p>x</p>\n</template>\n",
    },
    Case {
        name: "text content is written unescaped",
        input: "<p>a &lt; b &amp; c</p>",
        expected: "<p>a < b & c</p>\n",
    },
];

#[test]
fn test_fragment_cases() {
    for case in FRAGMENT_CASES {
        let actual = htmlindent::fragment_to_string(case.input)
            .unwrap_or_else(|e| panic!("{}: failed to format: {e}", case.name));
        assert_eq!(case.expected, actual, "{}", case.name);
    }
}

#[test]
fn test_document_gets_implied_structure() {
    let actual = htmlindent::document_to_string("<!DOCTYPE html><title>T</title><p>x").unwrap();
    assert_eq!(
        "<html>\n <head>\n  <title>T</title>\n </head>\n <body>\n  <p>x</p>\n </body>\n</html>\n",
        actual
    );
}

#[test]
fn test_document_top_level_comment() {
    let actual = htmlindent::document_to_string("<!-- c --><html></html>").unwrap();
    assert_eq!(
        "<!-- c -->\n<html>\n <head>\n </head>\n <body>\n </body>\n</html>\n",
        actual
    );
}

#[test]
fn test_document_from_reader() {
    let mut out = Vec::new();
    htmlindent::document(&mut out, &mut "<li>".as_bytes()).unwrap();
    assert_eq!(
        "<html>\n <head>\n </head>\n <body>\n  <li>\n  </li>\n </body>\n</html>\n",
        String::from_utf8(out).unwrap()
    );
}

/// The dom owns the tree; dropping it empties every node's children, so it
/// is returned alongside the handles.
fn parse_nodes(html: &str) -> (RcDom, Vec<Handle>) {
    let context = QualName::new(
        None,
        Namespace::from("http://www.w3.org/1999/xhtml"),
        LocalName::from("body"),
    );
    let dom: RcDom = parse_fragment(RcDom::default(), ParseOpts::default(), context, Vec::new())
        .from_utf8()
        .read_from(&mut html.as_bytes())
        .unwrap();
    let root = dom.document.children.borrow()[0].clone();
    let nodes = root.children.borrow().clone();
    (dom, nodes)
}

#[test]
fn test_nodes_formats_a_selection() {
    let (_dom, nodes) = parse_nodes("<p>one</p><p>two</p><p>three</p>");
    let mut out = Vec::new();
    htmlindent::nodes(&mut out, &nodes[1..]).unwrap();
    assert_eq!("<p>two</p>\n<p>three</p>\n", String::from_utf8(out).unwrap());
}

#[test]
fn test_nodes_empty_list_writes_nothing() {
    let mut out = Vec::new();
    htmlindent::nodes(&mut out, &[]).unwrap();
    assert!(out.is_empty());
}

/// Accepts `budget` bytes, then fails every write.
struct BrokenPipe {
    budget: usize,
    written: Vec<u8>,
}

impl Write for BrokenPipe {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        if self.budget == 0 {
            return Err(io::Error::new(io::ErrorKind::BrokenPipe, "closed"));
        }
        let n = buf.len().min(self.budget);
        self.written.extend_from_slice(&buf[..n]);
        self.budget -= n;
        Ok(n)
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

#[test]
fn test_write_failure_aborts_and_keeps_prefix() {
    let mut sink = BrokenPipe {
        budget: 10,
        written: Vec::new(),
    };
    let err = htmlindent::fragment(&mut sink, &mut "<ol> <li>A</li> </ol>".as_bytes()).unwrap_err();
    match err {
        Error::Write(e) => assert_eq!(e.kind(), io::ErrorKind::BrokenPipe),
        other => panic!("expected a write error, got {other:?}"),
    }
    assert_eq!(b"<ol>\n <li>".as_slice(), sink.written.as_slice());
}

struct FailingReader;

impl Read for FailingReader {
    fn read(&mut self, _buf: &mut [u8]) -> io::Result<usize> {
        Err(io::Error::new(io::ErrorKind::Other, "disk on fire"))
    }
}

#[test]
fn test_read_failure_writes_nothing() {
    let mut out = Vec::new();
    let err = htmlindent::fragment(&mut out, &mut FailingReader).unwrap_err();
    assert!(matches!(err, Error::Parse(_)), "{err:?}");
    assert!(out.is_empty());

    let err = htmlindent::document(&mut out, &mut FailingReader).unwrap_err();
    assert!(matches!(err, Error::Parse(_)), "{err:?}");
    assert!(out.is_empty());
}

#[test]
fn test_formatting_is_idempotent() {
    for input in [
        r#"<ol> <li style="&amp;&#38;"> A </li> <li> B </li> </ol> "#,
        r#"<ul><li><a href="http://example.com">Test</a>.</li></ul>"#,
        "<div><p>Hello <b>world</b></p></div>",
        "<div><pre>  a\n   b </pre></div>",
        "<p>a<br>b</p>",
        "<pre>a<pre>\n\nb</pre></pre>",
    ] {
        let once = htmlindent::fragment_to_string(input).unwrap();
        let twice = htmlindent::fragment_to_string(&once).unwrap();
        assert_eq!(once, twice, "{input}");
    }
}
