//! Documentation content for the boolex CLI

use crate::grammar::Style;

/// Table of the built-in syntax styles
pub fn get_styles_overview() -> String {
    let mut out = String::from("BOOLEX SYNTAX STYLES\n\n");
    out.push_str(&format!(
        "  {:<8} {:<6} {:<6} {:<6} {}\n",
        "style", "and", "or", "quote", "example"
    ));

    for style in Style::ALL {
        let g = style.grammar();
        let example = format!(
            "a {and} ({q}b c{q} {or} f(1, 2))",
            and = g.and_operator(),
            or = g.or_operator(),
            q = g.quote()
        );
        out.push_str(&format!(
            "  {:<8} {:<6} {:<6} {:<6} {}\n",
            style.name(),
            g.and_operator(),
            g.or_operator(),
            g.quote(),
            example
        ));
    }

    out.push_str(
        r#"
COMMON RULES

  ( )               Grouping; `name(...)` is a function literal
  ,                 Parameter separator inside function literals
  \                 Escape: the next character is taken literally
  --modifiers '!~'  Leading characters recorded as literal modifiers

Run 'boolex dnf <expr>' to see the clauses of an expression.
"#,
    );
    out
}
