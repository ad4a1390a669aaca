//! Go-to-definition over several open documents.

use std::sync::Arc;

use bsl_ls::base::{Position, Range};
use bsl_ls::hir::{
    ExternalSymbol, ExternalSymbolKind, ReferenceOccurrence, ReferenceResolver, ServerContext,
    SymbolTable,
};
use bsl_ls::ide::{DefinitionProvider, LocationLink};

use crate::helpers::document_fixtures::{open_document, procedure};

const A: &str = "file:///src/CommonModules/A/Ext/Module.bsl";
const B: &str = "file:///src/CommonModules/B/Ext/Module.bsl";

fn provider(server: &Arc<ServerContext>) -> DefinitionProvider {
    DefinitionProvider::new(ReferenceResolver::new(Arc::clone(server)))
}

#[test]
fn test_definition_of_local_procedure() {
    let server = Arc::new(ServerContext::new());
    let a = open_document(&server, A, |version, builder| {
        let mut table = SymbolTable::new(version);
        let foo = table.insert(procedure(
            version.document,
            "Foo",
            Range::from_coords(3, 0, 5, 1),
            Range::from_coords(3, 10, 3, 14),
        ));
        builder
            .symbol_table(table)
            .reference(ReferenceOccurrence::to_source(foo, Range::from_coords(10, 2, 10, 6)))
    });

    let links = provider(&server).get_definition(&a, Position::new(10, 4));

    assert_eq!(
        links,
        vec![LocationLink {
            target_uri: Arc::from(A),
            target_range: Range::from_coords(3, 0, 5, 1),
            target_selection_range: Range::from_coords(3, 10, 3, 14),
            origin_selection_range: Range::from_coords(10, 2, 10, 6),
        }]
    );
}

#[test]
fn test_definition_in_other_document() {
    let server = Arc::new(ServerContext::new());

    let mut bar = None;
    open_document(&server, B, |version, builder| {
        let mut table = SymbolTable::new(version);
        bar = Some(table.insert(procedure(
            version.document,
            "Bar",
            Range::from_coords(0, 0, 2, 14),
            Range::from_coords(0, 8, 0, 11),
        )));
        builder.symbol_table(table)
    });
    let bar = bar.expect("Bar declared");

    let a = open_document(&server, A, |_, builder| {
        builder.reference(ReferenceOccurrence::to_source(bar, Range::from_coords(4, 1, 4, 6)))
    });

    let links = provider(&server).get_definition(&a, Position::new(4, 3));

    assert_eq!(links.len(), 1);
    // Target is the declaring document, origin is the usage in A
    assert_eq!(&*links[0].target_uri, B);
    assert_eq!(links[0].target_selection_range, Range::from_coords(0, 8, 0, 11));
    assert_eq!(links[0].origin_selection_range, Range::from_coords(4, 1, 4, 6));
}

#[test]
fn test_definition_of_platform_function_is_empty() {
    let server = Arc::new(ServerContext::new());
    let a = open_document(&server, A, |_, builder| {
        builder.reference(ReferenceOccurrence::to_external(
            ExternalSymbol::new("StrLen", ExternalSymbolKind::GlobalMethod),
            Range::from_coords(10, 2, 10, 8),
        ))
    });

    assert!(provider(&server).get_definition(&a, Position::new(10, 4)).is_empty());
}

#[test]
fn test_definition_without_reference_is_empty() {
    let server = Arc::new(ServerContext::new());
    let a = open_document(&server, A, |_, builder| builder);

    assert!(provider(&server).get_definition(&a, Position::new(1, 1)).is_empty());
}

#[test]
fn test_definition_after_owner_closed() {
    let server = Arc::new(ServerContext::new());

    let mut bar = None;
    open_document(&server, B, |version, builder| {
        let mut table = SymbolTable::new(version);
        bar = Some(table.insert(procedure(
            version.document,
            "Bar",
            Range::from_coords(0, 0, 2, 14),
            Range::from_coords(0, 8, 0, 11),
        )));
        builder.symbol_table(table)
    });
    let bar = bar.expect("Bar declared");
    let a = open_document(&server, A, |_, builder| {
        builder.reference(ReferenceOccurrence::to_source(bar, Range::from_coords(4, 1, 4, 6)))
    });

    server.remove_document(B);

    assert!(provider(&server).get_definition(&a, Position::new(4, 3)).is_empty());
}

#[test]
fn test_definition_after_owner_reanalysed_with_other_symbol() {
    let server = Arc::new(ServerContext::new());

    let mut foo = None;
    open_document(&server, B, |version, builder| {
        let mut table = SymbolTable::new(version);
        foo = Some(table.insert(procedure(
            version.document,
            "Foo",
            Range::from_coords(3, 0, 5, 1),
            Range::from_coords(3, 10, 3, 13),
        )));
        builder.symbol_table(table)
    });
    let foo = foo.expect("Foo declared");
    let a = open_document(&server, A, |_, builder| {
        builder.reference(ReferenceOccurrence::to_source(foo, Range::from_coords(4, 1, 4, 4)))
    });

    open_document(&server, B, |version, builder| {
        let mut table = SymbolTable::new(version);
        table.insert(procedure(
            version.document,
            "Bar",
            Range::from_coords(0, 0, 1, 1),
            Range::from_coords(0, 10, 0, 13),
        ));
        builder.symbol_table(table)
    });

    assert!(provider(&server).get_definition(&a, Position::new(4, 2)).is_empty());
}

#[test]
fn test_target_selection_lies_within_target_range() {
    let server = Arc::new(ServerContext::new());
    let a = open_document(&server, A, |version, builder| {
        let mut table = SymbolTable::new(version);
        let defs: Vec<_> = (0..5)
            .map(|i| {
                let line = i * 10;
                table.insert(procedure(
                    version.document,
                    &format!("Method{i}"),
                    Range::from_coords(line, 0, line + 3, 12),
                    Range::from_coords(line, 10, line, 17),
                ))
            })
            .collect();
        builder.symbol_table(table).references(
            defs.into_iter()
                .enumerate()
                .map(|(i, def)| {
                    let line = 100 + i as u32;
                    ReferenceOccurrence::to_source(def, Range::from_coords(line, 0, line, 7))
                }),
        )
    });

    let provider = provider(&server);
    for line in 100..105 {
        let links = provider.get_definition(&a, Position::new(line, 3));
        assert_eq!(links.len(), 1);
        assert!(links[0].target_range.contains_range(links[0].target_selection_range));
    }
}
