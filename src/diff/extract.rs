use crate::model::FileStatus;

const METADATA_PREFIXES: [&str; 6] = ["diff --git", "index ", "---", "+++", "@@", "\\"];

pub(crate) fn is_metadata(line: &str) -> bool {
    METADATA_PREFIXES.iter().any(|p| line.starts_with(p))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Fence {
    /// Opened by ```` ```markdown ````; both ends are dropped.
    Markdown,
    /// Any other fenced block; both ends are kept.
    Code,
}

#[derive(Default)]
struct FenceStack {
    open: Vec<Fence>,
}

impl FenceStack {
    /// Returns whether `content` belongs in the output.
    fn accept(&mut self, content: &str) -> bool {
        let trimmed = content.trim();
        if !trimmed.starts_with("```") {
            return true;
        }

        if trimmed.starts_with("```markdown") {
            self.open.push(Fence::Markdown);
            return false;
        }

        match self.open.last().copied() {
            Some(Fence::Code) => {
                if trimmed == "```" {
                    self.open.pop();
                }
                true
            }
            top => {
                if trimmed == "```" && top == Some(Fence::Markdown) {
                    self.open.pop();
                    false
                } else {
                    self.open.push(Fence::Code);
                    true
                }
            }
        }
    }
}

/// Rebuilds the post-change text of a file from its unified diff so it can
/// be rendered as Markdown. Diff syntax is removed, `-` lines are dropped and
/// a ```` ```markdown ```` wrapper around content is unwrapped.
pub fn extract_content(patch: &str, status: FileStatus) -> String {
    let mut kept: Vec<&str> = Vec::new();
    let mut fences = FenceStack::default();

    for line in patch.lines() {
        if is_metadata(line) {
            continue;
        }

        let content = if let Some(added) = line.strip_prefix('+') {
            added
        } else if status == FileStatus::Added || line.starts_with('-') {
            continue;
        } else {
            line.strip_prefix(' ').unwrap_or(line)
        };

        if fences.accept(content) {
            kept.push(content);
        }
    }

    kept.join("\n").trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn added_markdown_file() {
        let patch = "@@ -0,0 +1,2 @@\n+# Title\n+Hello";
        assert_eq!(extract_content(patch, FileStatus::Added), "# Title\nHello");
    }

    #[test]
    fn markdown_wrapper_is_unwrapped() {
        let patch = "@@ -0,0 +1,3 @@\n+```markdown\n+# X\n+```";
        assert_eq!(extract_content(patch, FileStatus::Added), "# X");
    }

    #[test]
    fn metadata_only_patch_is_empty() {
        let patch = "diff --git a/x b/x\nindex 83db48f..bf269f4 100644\n--- a/x\n+++ b/x";
        assert_eq!(extract_content(patch, FileStatus::Modified), "");
        assert_eq!(extract_content("", FileStatus::Added), "");
    }

    #[test]
    fn modified_keeps_context_and_additions() {
        let patch = "\
@@ -1,4 +1,4 @@
 # Notes
-old line
+new line
 tail
\\ No newline at end of file";
        assert_eq!(
            extract_content(patch, FileStatus::Modified),
            "# Notes\nnew line\ntail"
        );
    }

    #[test]
    fn added_status_skips_stray_context_and_removals() {
        let patch = "@@ -0,0 +1,2 @@\n context\n-gone\n+kept";
        assert_eq!(extract_content(patch, FileStatus::Added), "kept");
    }

    #[test]
    fn removed_status_follows_modified_rule() {
        let patch = "@@ -1,3 +0,0 @@\n-first\n-second\n unchanged";
        assert_eq!(extract_content(patch, FileStatus::Removed), "unchanged");
    }

    #[test]
    fn regular_code_fences_are_kept() {
        let patch = "@@ -0,0 +1,4 @@\n+Intro\n+```rust\n+fn main() {}\n+```";
        assert_eq!(
            extract_content(patch, FileStatus::Added),
            "Intro\n```rust\nfn main() {}\n```"
        );
    }

    #[test]
    fn code_block_inside_markdown_wrapper_closes_correctly() {
        let patch = "\
@@ -0,0 +1,7 @@
+```markdown
+# Guide
+```sh
+cargo run
+```
+Done
+```";
        assert_eq!(
            extract_content(patch, FileStatus::Added),
            "# Guide\n```sh\ncargo run\n```\nDone"
        );
    }

    #[test]
    fn markdown_fence_inside_code_block_is_dropped() {
        let patch = "@@ -0,0 +1,3 @@\n+```text\n+```markdown\n+body";
        assert_eq!(extract_content(patch, FileStatus::Added), "```text\nbody");

        let closed = "@@ -0,0 +1,5 @@\n+```text\n+```markdown\n+body\n+```\n+```";
        assert_eq!(
            extract_content(closed, FileStatus::Added),
            "```text\nbody\n```"
        );
    }

    #[test]
    fn context_fences_are_tracked_too() {
        let patch = "@@ -1,3 +1,3 @@\n ```markdown\n-old\n+new\n ```";
        assert_eq!(extract_content(patch, FileStatus::Modified), "new");
    }

    #[test]
    fn leading_and_trailing_blank_lines_are_trimmed() {
        let patch = "@@ -1,4 +1,4 @@\n \n \n+body\n ";
        assert_eq!(extract_content(patch, FileStatus::Modified), "body");
    }
}
