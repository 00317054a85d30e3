//
//  gitlab-node
//  resources/merge_request.rs
//
//  Created by Ngonidzashe Mangudya on 2026/02/14.
//  Copyright (c) 2026 IAMNGONI. All rights reserved.
//

//! Merge request operations: creation, retrieval, notes, discussions,
//! labels, merging and rebasing.
//!
//! ## Suggestions
//!
//! A note posted as a suggestion is wrapped in GitLab's suggestion fence so
//! the server renders it as a proposed patch: an opening marker line of
//! three backticks followed by `suggestion:-0+0`, the note body, and a
//! closing line of three backticks.
//!
//! The accompanying position payload omits `old_line` when it is zero, which
//! means the line has no counterpart in the old file. Negative values are
//! rejected before any request is built.
//!
//! ## Discussions
//!
//! A discussion is a threaded comment container; a note is one comment. When
//! replying to an existing discussion the discussion ID is mandatory and its
//! absence is a validation error, never a silent default.

use serde_json::{Map, Value};

use crate::error::{Error, Result};
use crate::params::ItemParams;
use crate::request::{encode_path, HttpMethod, ListOptions, RequestSpec};
use crate::validators::require_positive;

/// Whether a label mutation adds or removes labels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LabelAction {
    Add,
    Remove,
}

/// Where a discussion note is posted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NoteTarget {
    /// Start a new discussion thread.
    NewDiscussion,
    /// Reply to an existing discussion.
    Reply { discussion_id: String },
}

/// Diff position attached to a suggestion note.
#[derive(Debug, Clone)]
pub struct SuggestionPosition {
    pub position_type: String,
    pub new_path: String,
    pub old_path: String,
    pub new_line: i64,
    /// Zero means the line has no counterpart in the old file and the field
    /// is omitted from the payload entirely.
    pub old_line: i64,
    pub base_sha: String,
    pub head_sha: String,
    pub start_sha: String,
}

impl SuggestionPosition {
    fn from_params(params: &ItemParams) -> Result<Self> {
        let old_line = params.integer("oldLine");
        if old_line < 0 {
            return Err(Error::validation(
                "oldLine",
                params.index(),
                "must be a non-negative number",
            ));
        }
        Ok(Self {
            position_type: params.string_or("positionType", "text"),
            new_path: params.string("newPath"),
            old_path: params.string("oldPath"),
            new_line: params.integer_or("newLine", 1),
            old_line,
            base_sha: params.string("baseSha"),
            head_sha: params.string("headSha"),
            start_sha: params.string("startSha"),
        })
    }

    fn into_value(self) -> Value {
        let mut position = Map::new();
        position.insert("position_type".to_string(), Value::from(self.position_type));
        position.insert("new_path".to_string(), Value::from(self.new_path));
        position.insert("old_path".to_string(), Value::from(self.old_path));
        position.insert("new_line".to_string(), Value::from(self.new_line));
        position.insert("base_sha".to_string(), Value::from(self.base_sha));
        position.insert("head_sha".to_string(), Value::from(self.head_sha));
        position.insert("start_sha".to_string(), Value::from(self.start_sha));
        if self.old_line != 0 {
            position.insert("old_line".to_string(), Value::from(self.old_line));
        }
        Value::Object(position)
    }
}

/// Wraps a note body in GitLab's suggestion fence.
fn fence_suggestion(body: &str) -> String {
    format!("```suggestion:-0+0\n{body}\n```")
}

/// A decoded merge request operation.
#[derive(Debug, Clone)]
pub enum MergeRequestOperation {
    /// Open a merge request between two branches.
    Create {
        source_branch: String,
        target_branch: String,
        title: String,
        description: String,
    },
    /// Get one merge request.
    Get { iid: i64 },
    /// List merge requests.
    GetAll { options: ListOptions },
    /// Get the changes of a merge request.
    GetChanges { iid: i64 },
    /// Add a plain note.
    CreateNote { iid: i64, body: String },
    /// Get one note.
    GetNote { iid: i64, note_id: i64 },
    /// Delete one note.
    DeleteNote { iid: i64, note_id: i64 },
    /// Update one note's body.
    UpdateNote {
        iid: i64,
        note_id: i64,
        body: String,
    },
    /// List the discussions of a merge request.
    GetDiscussions { iid: i64, options: ListOptions },
    /// Get one discussion by ID.
    GetDiscussion { iid: i64, discussion_id: String },
    /// Change a discussion's resolved state.
    UpdateDiscussion {
        iid: i64,
        discussion_id: String,
        resolved: bool,
    },
    /// Resolve or unresolve a discussion.
    ResolveDiscussion {
        iid: i64,
        discussion_id: String,
        resolved: bool,
    },
    /// Delete a discussion.
    DeleteDiscussion { iid: i64, discussion_id: String },
    /// Update a note inside a discussion.
    UpdateDiscussionNote {
        iid: i64,
        discussion_id: String,
        note_id: i64,
        body: String,
    },
    /// Post a note to a discussion, optionally formatted as a suggestion.
    PostDiscussionNote {
        iid: i64,
        body: String,
        target: NoteTarget,
        suggestion: Option<SuggestionPosition>,
    },
    /// Merge the merge request.
    Merge {
        iid: i64,
        commit_message: String,
        squash: bool,
    },
    /// Rebase the merge request onto its target branch.
    Rebase { iid: i64, skip_ci: bool },
    /// Close the merge request.
    Close { iid: i64 },
    /// Reopen the merge request.
    Reopen { iid: i64 },
    /// Add or remove labels.
    Labels {
        iid: i64,
        action: LabelAction,
        labels: String,
    },
}

impl MergeRequestOperation {
    /// Decodes the operation for one item from its parameter bag.
    pub fn from_params(params: &ItemParams) -> Result<Self> {
        let index = params.index();
        let iid = || -> Result<i64> {
            let iid = params.integer("mergeRequestIid");
            require_positive(iid, "mergeRequestIid", index)?;
            Ok(iid)
        };
        let note_id = || -> Result<i64> {
            let id = params.integer("noteId");
            require_positive(id, "noteId", index)?;
            Ok(id)
        };

        match params.operation().as_str() {
            "create" => Ok(Self::Create {
                source_branch: params.string("source"),
                target_branch: params.string_or("target", "main"),
                title: params.string("title"),
                description: params.string("description"),
            }),
            "get" => Ok(Self::Get { iid: iid()? }),
            "getAll" => Ok(Self::GetAll {
                options: ListOptions::from_params(params),
            }),
            "getChanges" => Ok(Self::GetChanges { iid: iid()? }),
            "createNote" => Ok(Self::CreateNote {
                iid: iid()?,
                body: params.string("body"),
            }),
            "getNote" => Ok(Self::GetNote {
                iid: iid()?,
                note_id: note_id()?,
            }),
            "deleteNote" => Ok(Self::DeleteNote {
                iid: iid()?,
                note_id: note_id()?,
            }),
            "updateNote" => Ok(Self::UpdateNote {
                iid: iid()?,
                note_id: note_id()?,
                body: params.string("body"),
            }),
            "getDiscussions" => Ok(Self::GetDiscussions {
                iid: iid()?,
                options: ListOptions::from_params(params),
            }),
            "getDiscussion" => Ok(Self::GetDiscussion {
                iid: iid()?,
                discussion_id: params.string("discussionId"),
            }),
            "updateDiscussion" => Ok(Self::UpdateDiscussion {
                iid: iid()?,
                discussion_id: params.string("discussionId"),
                resolved: params.boolean_or("resolved", true),
            }),
            "resolveDiscussion" => Ok(Self::ResolveDiscussion {
                iid: iid()?,
                discussion_id: params.string("discussionId"),
                resolved: params.boolean_or("resolved", true),
            }),
            "deleteDiscussion" => Ok(Self::DeleteDiscussion {
                iid: iid()?,
                discussion_id: params.string("discussionId"),
            }),
            "updateDiscussionNote" => Ok(Self::UpdateDiscussionNote {
                iid: iid()?,
                discussion_id: params.string("discussionId"),
                note_id: note_id()?,
                body: params.string("body"),
            }),
            "postDiscussionNote" => {
                let iid = iid()?;
                let body = params.string("body");
                let suggestion = if params.boolean("asSuggestion") {
                    Some(SuggestionPosition::from_params(params)?)
                } else {
                    None
                };
                let target = if params.boolean("startDiscussion") {
                    NoteTarget::NewDiscussion
                } else {
                    let discussion_id = params.string("discussionId");
                    if discussion_id.is_empty() {
                        return Err(Error::validation(
                            "discussionId",
                            index,
                            "must be provided when replying to a discussion",
                        ));
                    }
                    NoteTarget::Reply { discussion_id }
                };
                Ok(Self::PostDiscussionNote {
                    iid,
                    body,
                    target,
                    suggestion,
                })
            }
            "merge" => Ok(Self::Merge {
                iid: iid()?,
                commit_message: params.string("mergeCommitMessage"),
                squash: params.string_or("mergeStrategy", "merge") == "squash",
            }),
            "rebase" => Ok(Self::Rebase {
                iid: iid()?,
                skip_ci: params.boolean("skipCi"),
            }),
            "close" => Ok(Self::Close { iid: iid()? }),
            "reopen" => Ok(Self::Reopen { iid: iid()? }),
            "labels" => Ok(Self::Labels {
                iid: iid()?,
                action: if params.string_or("labelAction", "add") == "add" {
                    LabelAction::Add
                } else {
                    LabelAction::Remove
                },
                labels: params.string("labels"),
            }),
            other => Err(Error::unsupported("mergeRequest", other, index)),
        }
    }

    /// Builds the request spec against a project base path.
    pub fn into_spec(self, base: &str) -> RequestSpec {
        match self {
            Self::Create {
                source_branch,
                target_branch,
                title,
                description,
            } => RequestSpec::new(HttpMethod::Post, format!("{base}/merge_requests"))
                .body("source_branch", source_branch)
                .body("target_branch", target_branch)
                .body("title", title)
                .body("description", description),
            Self::Get { iid } => {
                RequestSpec::new(HttpMethod::Get, format!("{base}/merge_requests/{iid}"))
            }
            Self::GetAll { options } => {
                RequestSpec::new(HttpMethod::Get, format!("{base}/merge_requests"))
                    .listing(options)
            }
            Self::GetChanges { iid } => RequestSpec::new(
                HttpMethod::Get,
                format!("{base}/merge_requests/{iid}/changes"),
            ),
            Self::CreateNote { iid, body } => RequestSpec::new(
                HttpMethod::Post,
                format!("{base}/merge_requests/{iid}/notes"),
            )
            .body("body", body),
            Self::GetNote { iid, note_id } => RequestSpec::new(
                HttpMethod::Get,
                format!("{base}/merge_requests/{iid}/notes/{note_id}"),
            ),
            Self::DeleteNote { iid, note_id } => RequestSpec::new(
                HttpMethod::Delete,
                format!("{base}/merge_requests/{iid}/notes/{note_id}"),
            ),
            Self::UpdateNote { iid, note_id, body } => RequestSpec::new(
                HttpMethod::Put,
                format!("{base}/merge_requests/{iid}/notes/{note_id}"),
            )
            .body("body", body),
            Self::GetDiscussions { iid, options } => RequestSpec::new(
                HttpMethod::Get,
                format!("{base}/merge_requests/{iid}/discussions"),
            )
            .listing(options),
            Self::GetDiscussion { iid, discussion_id } => RequestSpec::new(
                HttpMethod::Get,
                format!(
                    "{base}/merge_requests/{iid}/discussions/{}",
                    encode_path(&discussion_id)
                ),
            ),
            Self::UpdateDiscussion {
                iid,
                discussion_id,
                resolved,
            }
            | Self::ResolveDiscussion {
                iid,
                discussion_id,
                resolved,
            } => RequestSpec::new(
                HttpMethod::Put,
                format!(
                    "{base}/merge_requests/{iid}/discussions/{}",
                    encode_path(&discussion_id)
                ),
            )
            .body("resolved", resolved),
            Self::DeleteDiscussion { iid, discussion_id } => RequestSpec::new(
                HttpMethod::Delete,
                format!(
                    "{base}/merge_requests/{iid}/discussions/{}",
                    encode_path(&discussion_id)
                ),
            ),
            Self::UpdateDiscussionNote {
                iid,
                discussion_id,
                note_id,
                body,
            } => RequestSpec::new(
                HttpMethod::Put,
                format!(
                    "{base}/merge_requests/{iid}/discussions/{}/notes/{note_id}",
                    encode_path(&discussion_id)
                ),
            )
            .body("body", body),
            Self::PostDiscussionNote {
                iid,
                body,
                target,
                suggestion,
            } => {
                let endpoint = match &target {
                    NoteTarget::NewDiscussion => {
                        format!("{base}/merge_requests/{iid}/discussions")
                    }
                    NoteTarget::Reply { discussion_id } => format!(
                        "{base}/merge_requests/{iid}/discussions/{}/notes",
                        encode_path(discussion_id)
                    ),
                };
                let mut spec = RequestSpec::new(HttpMethod::Post, endpoint);
                match suggestion {
                    Some(position) => {
                        spec = spec
                            .body("body", fence_suggestion(&body))
                            .body("position", position.into_value());
                    }
                    None => {
                        spec = spec.body("body", body);
                    }
                }
                spec
            }
            Self::Merge {
                iid,
                commit_message,
                squash,
            } => {
                let mut spec = RequestSpec::new(
                    HttpMethod::Put,
                    format!("{base}/merge_requests/{iid}/merge"),
                )
                .body_if_set("merge_commit_message", &commit_message);
                if squash {
                    spec = spec.body("squash", true);
                }
                spec
            }
            Self::Rebase { iid, skip_ci } => {
                let mut spec = RequestSpec::new(
                    HttpMethod::Put,
                    format!("{base}/merge_requests/{iid}/rebase"),
                );
                if skip_ci {
                    spec = spec.query("skip_ci", true);
                }
                spec
            }
            Self::Close { iid } => {
                RequestSpec::new(HttpMethod::Put, format!("{base}/merge_requests/{iid}"))
                    .body("state_event", "close")
            }
            Self::Reopen { iid } => {
                RequestSpec::new(HttpMethod::Put, format!("{base}/merge_requests/{iid}"))
                    .body("state_event", "reopen")
            }
            Self::Labels {
                iid,
                action,
                labels,
            } => {
                let spec =
                    RequestSpec::new(HttpMethod::Put, format!("{base}/merge_requests/{iid}"));
                match action {
                    LabelAction::Add => spec.body("add_labels", labels),
                    LabelAction::Remove => spec.body("remove_labels", labels),
                }
            }
        }
    }
}
