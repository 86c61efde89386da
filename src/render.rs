//! Text rendering of a tree.
//!
//! ```text
//! .
//! ├── to
//! │   ├── mato
//! │   └── rnado
//! └── @id
//! ```
//!
//! With [`Settings::debug`](crate::Settings::debug) the header carries the
//! node count, leaves are marked and every edge shows the value of the node
//! it leads to.

use std::fmt::{self, Write};
use std::rc::Rc;

use colored::{ColoredString, Colorize};

use crate::node::{Edge, Node};
use crate::trie::Tree;

const LEAF_MARKER: &str = " 🍂";

struct Painter {
    color: bool,
}

impl Painter {
    fn paint<F>(&self, text: &str, style: F) -> String
    where
        F: FnOnce(ColoredString) -> ColoredString,
    {
        if self.color {
            style(text.normal()).to_string()
        } else {
            text.to_string()
        }
    }
}

impl<V: fmt::Debug> fmt::Display for Tree<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let painter = Painter {
            color: !self.settings.no_color,
        };
        let debug = self.settings.debug;

        f.write_str(&painter.paint(".", |s| s.bold()))?;
        if debug {
            let plural = if self.len() == 1 { "" } else { "s" };
            let count = format!(" ({} node{})", self.len(), plural);
            f.write_str(&painter.paint(&count, |s| s.magenta()))?;
        }
        f.write_char('\n')?;

        write_edges(f, &painter, debug, self.root())
    }
}

fn write_edges<V: fmt::Debug>(
    f: &mut fmt::Formatter<'_>,
    painter: &Painter,
    debug: bool,
    root: &Node<V>,
) -> fmt::Result {
    // (edge, indent of its line, whether it is the last sibling)
    let mut stack: Vec<(&Edge<V>, Rc<str>, bool)> = Vec::new();
    push_children(&mut stack, root, Rc::from(""));

    while let Some((edge, indent, last)) = stack.pop() {
        f.write_str(&indent)?;
        f.write_str(if last { "└── " } else { "├── " })?;
        f.write_str(&painter.paint(&edge.label_str(), |s| s.bold()))?;

        if debug {
            let child = edge.node();
            if child.is_leaf() {
                f.write_str(&painter.paint(LEAF_MARKER, |s| s.green()))?;
            }
            let value = match child.value() {
                Some(value) => format!(" → {:?}", value),
                None => " → None".to_string(),
            };
            f.write_str(&painter.paint(&value, |s| s.magenta()))?;
        }
        f.write_char('\n')?;

        let nested = format!("{}{}", indent, if last { "    " } else { "│   " });
        push_children(&mut stack, edge.node(), Rc::from(nested));
    }

    Ok(())
}

// Pushed in reverse so the first edge is written first.
fn push_children<'t, V>(
    stack: &mut Vec<(&'t Edge<V>, Rc<str>, bool)>,
    node: &'t Node<V>,
    indent: Rc<str>,
) {
    let edges = node.edges();
    for (i, edge) in edges.iter().enumerate().rev() {
        stack.push((edge, Rc::clone(&indent), i + 1 == edges.len()));
    }
}
