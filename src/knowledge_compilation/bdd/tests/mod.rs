mod bdd_test_fixtures;
