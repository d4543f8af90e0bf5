//! Prompt templates: documentation and usage.
//!
//! Pure string functions. Method bodies and snippets are interpolated as-is,
//! without truncation, so a very large method yields a very large prompt.

use code_indexer::MethodRecord;

/// Use-case text emitted when no retrieved snippet calls the method.
/// The usage prompt asks the model for the same sentence when it finds no call site.
pub const NO_USE_CASES: &str = "No use cases were found for this method.";

const DOC_INSTRUCTIONS: &str = r#"You are documenting a Java code base. Write documentation for the Java method below.

Answer in Markdown using exactly these four sections, in this order:
**Method:** the method signature in backticks
**Purpose:** one or two sentences on what the method is for
**Logic:** the steps the method performs, as a numbered list
**Notes:** side effects, edge cases and thrown exceptions; write "None." if there are none

Example
Input:
```java
public boolean isAdult(Person person) {
    return person.getAge() >= 18;
}
```
Output:
**Method:** `public boolean isAdult(Person person)`
**Purpose:** Tells whether a person has reached legal age.
**Logic:**
1. Reads the age of `person`.
2. Compares it with 18 and returns the result.
**Notes:** Throws `NullPointerException` when `person` is null.
"#;

const USAGE_INSTRUCTIONS: &str = r#"You are given fragments of a Java project. Find every place where the method named below is called.

For each call site write one numbered pair:
Use case N: the class and method that make the call
Description: what the call achieves at that place

Only describe calls that appear in the fragments. Do not invent call sites."#;

const USAGE_EXAMPLE: &str = r#"Example for method `reserve`:
Use case 1: `OrderService.placeOrder`
Description: Reserves stock for every order line before the order is saved.
Use case 2: `CartController.checkout`
Description: Reserves items when the customer starts checkout, so they cannot be sold twice."#;

const GROUNDING_PREAMBLE: &str = "Use the following pieces of context to perform the instruction at the end. \
If you don't know the answer, just say that you don't know, don't try to make up an answer.";

/// Documentation prompt for one method.
pub fn compose_documentation_prompt(method: &MethodRecord) -> String {
    let owner = if method.class_name.is_empty() {
        String::new()
    } else {
        format!(" in class `{}`", method.class_name)
    };

    format!(
        "{DOC_INSTRUCTIONS}\nNow document the method `{name}`{owner}:\n```java\n{body}\n```\n",
        name = method.method_name,
        body = method.body,
    )
}

/// Documentation prompt preceded by retrieved project context.
pub fn compose_grounded_documentation_prompt(method: &MethodRecord, context_text: &str) -> String {
    format!(
        "{GROUNDING_PREAMBLE}\n\nContext:\n{context}\n\nInstruction:\n{doc}",
        context = context_text.trim_end(),
        doc = compose_documentation_prompt(method),
    )
}

/// Usage prompt for `method_name` over the retrieved snippets.
pub fn compose_usage_prompt(method_name: &str, context_text: &str) -> String {
    format!(
        "{USAGE_INSTRUCTIONS}\nIf none of the fragments calls `{method_name}`, answer exactly: {NO_USE_CASES}\n\n\
         {USAGE_EXAMPLE}\n\nMethod: `{method_name}`\n\nFragments:\n{context_text}\n"
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use code_indexer::parse_java;

    fn bar() -> MethodRecord {
        parse_java("class Foo { public int bar() { return 1; } }")
            .unwrap()
            .methods
            .remove(0)
    }

    #[test]
    fn documentation_prompt_carries_body_name_and_sections() {
        let p = compose_documentation_prompt(&bar());

        assert!(p.contains("public int bar() { return 1; }"));
        assert!(p.contains("`bar` in class `Foo`"));
        for section in ["**Method:**", "**Purpose:**", "**Logic:**", "**Notes:**"] {
            assert!(p.contains(section), "missing {section}");
        }
    }

    #[test]
    fn usage_prompt_contains_literal_snippet_and_name() {
        let snippet = "void run() {\n  int x = foo.bar(2);\n}";
        let p = compose_usage_prompt("bar", snippet);

        assert!(p.contains(snippet));
        assert!(p.contains("`bar`"));
        assert!(p.contains(NO_USE_CASES));
    }

    #[test]
    fn large_bodies_are_not_truncated() {
        let mut m = bar();
        m.body = format!("public int bar() {{ {} }}", "x++; ".repeat(20_000));
        assert!(compose_documentation_prompt(&m).contains(&m.body));
    }

    #[test]
    fn grounded_prompt_puts_context_before_instruction() {
        let p = compose_grounded_documentation_prompt(&bar(), "class Baz { int q() { return new Foo().bar(); } }");
        let ctx_at = p.find("class Baz").unwrap();
        let instr_at = p.find("Instruction:").unwrap();
        assert!(ctx_at < instr_at);
        assert!(p.starts_with("Use the following pieces of context"));
    }
}
