use vault_keys::{KeyGraph, KeySet, NodeKind, Position, VaultMap, COLLECTOR_N};

const FOUR_ENTRANCES: &str = "\
#######
#a.#Cd#
##@#@##
#######
##@#@##
#cB#Ab#
#######";

const CORRIDOR: &str = "\
###########
#b.a@....c#
###########
#@#@#@#####
###########";

fn graph_of(text: &str) -> KeyGraph {
    KeyGraph::new(&VaultMap::try_from_lines(text.lines()).unwrap())
}

fn edges_of(graph: &KeyGraph, node_ind: usize) -> Vec<(usize, usize, String)> {
    let mut edges = graph
        .edges(node_ind)
        .iter()
        .map(|edge| (edge.to(), edge.steps_n(), edge.doors().iter().collect()))
        .collect::<Vec<_>>();
    edges.sort();
    edges
}

#[test]
fn entrances_come_first_then_keys_in_letter_order() {
    let graph = graph_of(FOUR_ENTRANCES);
    let kinds = graph
        .nodes()
        .iter()
        .map(|node| node.kind())
        .collect::<Vec<_>>();

    assert_eq!(
        kinds,
        vec![
            NodeKind::Entrance(0),
            NodeKind::Entrance(1),
            NodeKind::Entrance(2),
            NodeKind::Entrance(3),
            NodeKind::Key('a'),
            NodeKind::Key('b'),
            NodeKind::Key('c'),
            NodeKind::Key('d'),
        ]
    );
    assert_eq!(graph.nodes()[1].pos(), &Position::new(2, 4));
    assert_eq!(graph.nodes()[5].pos(), &Position::new(5, 5));
    assert_eq!(graph.key_n(), 4);
}

#[test]
fn edges_record_steps_and_doors() {
    let graph = graph_of(FOUR_ENTRANCES);

    assert_eq!(edges_of(&graph, 0), vec![(4, 2, String::new())]);
    assert_eq!(edges_of(&graph, 1), vec![(7, 2, "c".to_string())]);
    assert_eq!(edges_of(&graph, 2), vec![(6, 2, "b".to_string())]);
    assert_eq!(edges_of(&graph, 3), vec![(5, 2, "a".to_string())]);
    // Nothing but walls and its own entrance behind key d.
    assert!(graph.edges(7).is_empty());
}

#[test]
fn edges_stop_at_first_key() {
    let graph = graph_of(CORRIDOR);
    let (a, b, c) = (4, 5, 6);

    assert_eq!(
        edges_of(&graph, 0),
        vec![(a, 1, String::new()), (c, 5, String::new())]
    );
    assert_eq!(edges_of(&graph, b), vec![(a, 2, String::new())]);
    assert_eq!(
        edges_of(&graph, a),
        vec![(b, 2, String::new()), (c, 6, String::new())]
    );
    for node_ind in 1..COLLECTOR_N {
        assert!(graph.edges(node_ind).is_empty());
    }
}

#[test]
fn lone_entrance_is_shared_by_all_collectors() {
    let graph = graph_of("#######\n#a.#Cd#\n##...##\n##.@.##\n#######");

    for node_ind in 0..COLLECTOR_N {
        assert_eq!(graph.nodes()[node_ind].pos(), &Position::new(3, 3));
        assert_eq!(
            edges_of(&graph, node_ind),
            vec![(4, 4, String::new()), (5, 4, "c".to_string())]
        );
    }
}

#[test]
fn doors_without_keys_never_close() {
    let graph = graph_of("#######\n#a.#Cd#\n##...##\n##.@.##\n#######");
    let to_d = graph
        .edges(0)
        .iter()
        .find(|edge| edge.to() == 5)
        .copied()
        .unwrap();

    assert_eq!(graph.all_keys(), "ad".chars().collect::<KeySet>());
    assert!(graph.is_passable(&to_d, &KeySet::new()));
}

#[test]
fn doors_need_their_keys() {
    let graph = graph_of(FOUR_ENTRANCES);
    let to_d = graph.edges(1)[0];

    assert!(!graph.is_passable(&to_d, &KeySet::new()));
    assert!(!graph.is_passable(&to_d, &"abd".chars().collect()));
    assert!(graph.is_passable(&to_d, &KeySet::new().with('c')));
}

#[test]
fn key_set_operations() {
    let mut keys = KeySet::new();
    keys.insert('z');
    keys.insert('a');
    keys.insert('m');

    assert_eq!(keys.len(), 3);
    assert!(keys.contains('m'));
    assert!(!keys.contains('b'));
    assert_eq!(keys.iter().collect::<String>(), "amz");
    assert_eq!(keys.to_string(), "{amz}");
    assert!(KeySet::new().with('a').is_subset(&keys));
    assert!(!KeySet::new().with('b').is_subset(&keys));
    assert_eq!(
        keys.intersection(&"abz".chars().collect()),
        "az".chars().collect::<KeySet>()
    );
    assert!(KeySet::new().is_empty());
}

#[test]
fn display_lists_every_node() {
    let graph = graph_of(FOUR_ENTRANCES);
    let text = graph.to_string();

    assert_eq!(text.lines().count(), 8);
    assert!(text.contains("1: @1 at (2, 4) -> d(2, doors {c})"));
}
