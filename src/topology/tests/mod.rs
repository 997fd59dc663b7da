mod legality_tests;
